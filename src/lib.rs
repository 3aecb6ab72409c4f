pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod segments;
pub mod series;
pub mod trends;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
