//! Outbound clients for the sibling services the vehicles service consults.

pub mod maps;
pub mod prices;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unexpected status: {0}")]
    Status(u16),
}
