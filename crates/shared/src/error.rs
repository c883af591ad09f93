use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {id} is invalid: {reason}")]
    InvalidProduct { id: ProductId, reason: String },
}

/// Why the session declined an intent. Rejections never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("real AR requires a secure handheld device")]
    ArRealUnavailable,
    #[error("no product at shortcut position {position}")]
    ShortcutOutOfRange { position: usize },
    #[error("unknown product id {product_id}")]
    UnknownProduct { product_id: ProductId },
    #[error("object has not been placed yet")]
    NotPlaced,
    #[error("no interactive model is displayed")]
    NoActiveModel,
}
