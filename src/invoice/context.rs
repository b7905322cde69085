//! Rendering context for invoice templates.
//!
//! Flattens an [`Invoice`] into the string values the template engine
//! substitutes, plus one [`ProductRow`] per product for repeated table rows.

use std::collections::BTreeMap;

use super::models::{Invoice, Product};

/// Placeholder prefix for keys resolved against a product row.
pub const PRODUCT_PREFIX: &str = "product.";

/// One line of the invoice table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// 1-based position in the invoice.
    pub row_number: usize,
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

impl ProductRow {
    /// Resolve a `product.*` field name (without the prefix).
    pub fn lookup(&self, field: &str) -> Option<String> {
        match field {
            "number" => Some(self.row_number.to_string()),
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "quantity" => Some(self.quantity.to_string()),
            "price" => Some(format_amount(self.unit_price)),
            "total" => Some(format_amount(self.line_total)),
            _ => None,
        }
    }
}

/// Map products to table rows, preserving order.
pub fn products_to_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .enumerate()
        .map(|(index, product)| ProductRow {
            row_number: index + 1,
            id: product.id.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
            unit_price: product.price,
            line_total: product.quantity as f64 * product.price,
        })
        .collect()
}

/// Format a monetary value with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Flat placeholder values for one invoice.
#[derive(Debug, Clone)]
pub struct RenderContext {
    fields: BTreeMap<&'static str, String>,
    rows: Vec<ProductRow>,
}

impl RenderContext {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("id", invoice.id.clone());
        fields.insert("date", invoice.date.clone());
        fields.insert("title", invoice.title.clone());
        fields.insert("description", invoice.description.clone());
        fields.insert("address", invoice.address.clone());
        fields.insert("total", format_amount(invoice.total));

        Self {
            fields,
            rows: products_to_rows(&invoice.products),
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    /// Resolve a key inside a product row: `product.*` against the row,
    /// anything else against the invoice fields.
    pub fn lookup_in_row(&self, row: &ProductRow, key: &str) -> Option<String> {
        match key.strip_prefix(PRODUCT_PREFIX) {
            Some(field) => row.lookup(field),
            None => self.field(key).map(str::to_string),
        }
    }
}
