use thiserror::Error;

pub mod types;
pub mod utils;
pub mod env;
pub mod admin_http;
pub mod client;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unexpected http status {0}")]
    Status(u16),
    #[error("rejected by server: {0}")]
    Rejected(String),
    #[error("bad format: {0}")]
    Format(String),
}
