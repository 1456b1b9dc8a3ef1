pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod models;
pub mod rapidapi;
#[cfg(feature = "server")]
pub mod server;

pub use config::{
    ConfigProvider, EnvConfigProvider, GenerationConfig, ServerConfig, UpstreamConfig,
};
pub use error::{RelayError, Result};
pub use handler::{HandlerResponse, ImageHandler};
pub use models::*;
pub use rapidapi::{ImageClient, ImageProvider};
