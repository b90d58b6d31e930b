//! Query results.

use crate::catalog::Product;
use serde::Serialize;

/// The visible products of one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResults<'a> {
    /// Matching products, in display order.
    pub products: Vec<&'a Product>,
    /// Size of the list the query ran over.
    pub total_available: usize,
}

impl<'a> QueryResults<'a> {
    pub fn new(products: Vec<&'a Product>, total_available: usize) -> Self {
        Self {
            products,
            total_available,
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// "1 product found" / "N products found".
    pub fn count_label(&self) -> String {
        let noun = if self.len() == 1 { "product" } else { "products" };
        format!("{} {} found", self.len(), noun)
    }
}
