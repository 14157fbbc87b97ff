pub mod config;
pub mod error;
pub mod feed;
pub mod newsletter;
pub mod pipeline;

pub use config::AppConfig;
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{generate, GenerateReport};
