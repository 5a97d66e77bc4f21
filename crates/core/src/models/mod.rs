pub mod chart;
pub mod company;
pub mod directory;
pub mod export;
pub mod price;
pub mod selection;
pub mod settings;
pub mod view;
