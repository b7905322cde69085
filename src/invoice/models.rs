use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Invoice {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    pub address: String,
    /// Client-supplied, not recomputed from `products`.
    pub total: f64,
    pub products: Vec<Product>,
}

/// Body of `POST /generate/invoice/{filename}`.
///
/// The invoice fields sit at the top level of the body, next to an optional
/// `template` naming a file in the templates directory.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct InvoiceRequest {
    #[serde(flatten)]
    pub invoice: Invoice,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct GenerateInvoiceResponse {
    pub message: String,
    pub docx: String,
    pub pdf: String,
}
