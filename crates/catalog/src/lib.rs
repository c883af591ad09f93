//! Read-only product catalog.

use std::{collections::HashSet, fs, path::Path, sync::Arc};

use serde::Serialize;
use shared::{
    domain::{Product, ProductId},
    error::CatalogError,
};
use tracing::info;

mod builtin;

pub use builtin::builtin_products;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogStats {
    pub count: usize,
    pub price_range: Option<(f64, f64)>,
}

/// Ordered, immutable product list. Cloning shares the underlying records.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate(&products)?;
        Ok(Self {
            products: products.into(),
        })
    }

    pub fn builtin() -> Self {
        Self {
            products: builtin_products().into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            products: Vec::new().into(),
        }
    }

    /// Loads a JSON array of products, validating ids, prices and dimensions.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::new(products)?;
        info!(
            path = %path.display(),
            count = catalog.len(),
            "catalog: loaded products from file"
        );
        Ok(catalog)
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Zero-based position lookup.
    pub fn at(&self, position: usize) -> Option<&Product> {
        self.products.get(position)
    }

    pub fn first(&self) -> Option<&Product> {
        self.products.first()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// `(min, max)` over every price, `None` when the catalog is empty.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut prices = self.products.iter().map(|product| product.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(min, max), price| {
            (min.min(price), max.max(price))
        }))
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            count: self.len(),
            price_range: self.price_range(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if product.id.0 == 0 {
            return Err(CatalogError::InvalidProduct {
                id: product.id,
                reason: "id must be a positive integer".into(),
            });
        }
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        if !(product.price.is_finite() && product.price > 0.0) {
            return Err(CatalogError::InvalidProduct {
                id: product.id,
                reason: format!("price must be positive, got {}", product.price),
            });
        }
        if !product.dimensions.is_positive() {
            return Err(CatalogError::InvalidProduct {
                id: product.id,
                reason: "dimensions must be positive".into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
