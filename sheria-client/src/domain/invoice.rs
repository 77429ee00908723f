use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateInvoiceRequest {
    pub time_entries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
}

impl GenerateInvoiceRequest {
    pub fn new(time_entries: Vec<String>) -> Self {
        Self {
            time_entries,
            ..Default::default()
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub invoice_id: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_hours: f64,
}
