use chrono::{DateTime, Utc};
use shared::domain::Product;

use crate::surface::CaptureRequest;

const UNNAMED_MODEL: &str = "product";

/// `<prefix>-<model>-<unix millis>.png`
pub fn capture_file_name(prefix: &str, product: Option<&Product>, at: DateTime<Utc>) -> String {
    let model = product
        .map(|product| product.model.as_str())
        .filter(|model| !model.is_empty())
        .unwrap_or(UNNAMED_MODEL);
    format!("{prefix}-{model}-{}.png", at.timestamp_millis())
}

pub fn capture_request(prefix: &str, product: Option<&Product>, at: DateTime<Utc>) -> CaptureRequest {
    CaptureRequest {
        file_name: capture_file_name(prefix, product, at),
        product_id: product.map(|product| product.id),
        requested_at: at,
    }
}
