pub mod traits;

// Provider implementations
pub mod http_client;
