// ═══════════════════════════════════════════════════════════════════
// Provider Tests: DataClient against an in-process HTTP responder
// ═══════════════════════════════════════════════════════════════════

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use stock_dashboard_core::errors::{CoreError, Resource};
use stock_dashboard_core::models::company::Company;
use stock_dashboard_core::models::settings::Settings;
use stock_dashboard_core::providers::http_client::DataClient;
use stock_dashboard_core::providers::traits::MarketDataProvider;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: canned HTTP responder
// ═══════════════════════════════════════════════════════════════════

#[derive(Clone)]
struct Route {
    path: &'static str,
    status: u16,
    body: &'static str,
}

fn route(path: &'static str, status: u16, body: &'static str) -> Route {
    Route { path, status, body }
}

struct Stub {
    base_url: String,
    /// Request targets (path + query) in arrival order
    requests: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    fn client(&self) -> DataClient {
        let settings = Settings {
            api_base_url: self.base_url.clone(),
            ..Settings::default()
        };
        DataClient::new(&settings)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

async fn serve(routes: Vec<Route>) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let head = String::from_utf8_lossy(&buf).to_string();
                let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                log.lock().unwrap().push(target.clone());

                let path = target.split('?').next().unwrap_or("/");
                let (status, body) = routes
                    .iter()
                    .find(|r| r.path == path)
                    .map(|r| (r.status, r.body))
                    .unwrap_or((404, "{\"detail\":\"Not Found\"}"));

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Stub {
        base_url: format!("http://{addr}"),
        requests,
    }
}

const PRICES: &str = r#"[
    {"Date":"2024-01-01","Open":10,"High":12,"Low":9,"Close":11},
    {"Date":"2024-01-02","Open":11.5,"High":13,"Low":null,"Close":12.75}
]"#;

const STATS: &str =
    r#"{"latest_close":2456.8,"high_52wk":2856.15,"low_52wk":2012.0,"avg_volume":null}"#;

// ═══════════════════════════════════════════════════════════════════
// DataClient: construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn default_points_at_local_provider() {
        let client = DataClient::default();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.name(), "HTTP");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let settings = Settings {
            api_base_url: "https://data.example.com/api/".into(),
            ..Settings::default()
        };
        assert_eq!(DataClient::new(&settings).base_url(), "https://data.example.com/api");
    }
}

// ═══════════════════════════════════════════════════════════════════
// DataClient: successful reads
// ═══════════════════════════════════════════════════════════════════

mod reads {
    use super::*;

    #[tokio::test]
    async fn list_companies_keeps_order() {
        let stub = serve(vec![route(
            "/companies",
            200,
            r#"[{"symbol":"TCS.NS","name":"Tata Consultancy"},{"symbol":"INFY.NS","name":"Infosys"}]"#,
        )])
        .await;

        let companies = stub.client().list_companies().await.unwrap();
        assert_eq!(
            companies,
            vec![
                Company::new("TCS.NS", "Tata Consultancy"),
                Company::new("INFY.NS", "Infosys"),
            ]
        );
        assert_eq!(stub.requests(), vec!["/companies".to_string()]);
    }

    #[tokio::test]
    async fn get_prices_decodes_capitalised_fields() {
        let stub = serve(vec![route("/prices", 200, PRICES)]).await;

        let rows = stub.client().get_prices("ABC").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].close, Some(11.0));
        assert_eq!(rows[1].open, Some(11.5));
        assert_eq!(rows[1].low, None);
        assert_eq!(stub.requests(), vec!["/prices?symbol=ABC".to_string()]);
    }

    #[tokio::test]
    async fn get_prices_empty_series() {
        let stub = serve(vec![route("/prices", 200, "[]")]).await;
        assert!(stub.client().get_prices("ABC").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_stats_decodes_snake_case_fields() {
        let stub = serve(vec![route("/stats", 200, STATS)]).await;

        let stats = stub.client().get_stats("ABC").await.unwrap();
        assert_eq!(stats.latest_close, Some(2456.8));
        assert_eq!(stats.high_52_week, Some(2856.15));
        assert_eq!(stats.low_52_week, Some(2012.0));
        assert_eq!(stats.avg_volume, None);
    }

    #[tokio::test]
    async fn symbol_is_percent_encoded() {
        let stub = serve(vec![route("/prices", 200, "[]"), route("/stats", 200, STATS)]).await;
        let client = stub.client();

        client.get_prices("M&M.NS").await.unwrap();
        client.get_stats("BRK B").await.unwrap();

        assert_eq!(
            stub.requests(),
            vec![
                "/prices?symbol=M%26M.NS".to_string(),
                "/stats?symbol=BRK%20B".to_string(),
            ]
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// DataClient: failures
// ═══════════════════════════════════════════════════════════════════

mod failures {
    use super::*;

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let stub = serve(vec![route("/prices", 500, "{\"detail\":\"boom\"}")]).await;

        let err = stub.client().get_prices("ABC").await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.resource(), Some(Resource::Prices));
        assert!(err.to_string().contains("500"));
        assert_eq!(err.user_message(), "Price fetch failed");
    }

    #[tokio::test]
    async fn missing_route_is_network_error() {
        let stub = serve(vec![]).await;
        let err = stub.client().get_stats("ABC").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Network {
                resource: Resource::Stats,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn companies_non_success_is_network_error() {
        let stub = serve(vec![route("/companies", 503, "{}")]).await;
        let err = stub.client().list_companies().await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.user_message(), "Failed to load companies");
    }

    #[tokio::test]
    async fn wrong_field_type_is_decode_error() {
        let stub = serve(vec![route(
            "/prices",
            200,
            r#"[{"Date":"2024-01-01","Open":"ten","High":12,"Low":9,"Close":11}]"#,
        )])
        .await;

        let err = stub.client().get_prices("ABC").await.unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.resource(), Some(Resource::Prices));
        assert_eq!(err.user_message(), "Price fetch failed");
    }

    #[tokio::test]
    async fn missing_date_is_decode_error() {
        let stub = serve(vec![route("/prices", 200, r#"[{"Open":1,"High":1,"Low":1,"Close":1}]"#)]).await;
        assert!(stub.client().get_prices("ABC").await.unwrap_err().is_decode());
    }

    #[tokio::test]
    async fn object_instead_of_array_is_decode_error() {
        let stub = serve(vec![route("/prices", 200, STATS)]).await;
        assert!(stub.client().get_prices("ABC").await.unwrap_err().is_decode());
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let stub = serve(vec![route("/stats", 200, "<html>oops</html>")]).await;
        let err = stub.client().get_stats("ABC").await.unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.user_message(), "Stats fetch failed");
    }

    #[tokio::test]
    async fn connection_refused_is_network_error_without_query() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let settings = Settings {
            api_base_url: format!("http://{addr}"),
            ..Settings::default()
        };
        let err = DataClient::new(&settings).get_prices("SECRET").await.unwrap_err();

        assert!(err.is_network());
        assert!(!err.to_string().contains("symbol=SECRET"));
    }
}
