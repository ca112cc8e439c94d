use crate::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotsError {
    #[error("Failed to load {collection}: {reason}")]
    Load { collection: String, reason: String },

    #[error("Mall not found: {0}")]
    MallNotFound(ItemId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SpotsError>;
