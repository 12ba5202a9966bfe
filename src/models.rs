use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Normalized listing attributes pulled from one product page.
/// Every field has a documented fallback, so construction never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub title: String,
    /// Current price in the minor currency unit (digits concatenated).
    pub price: u64,
    /// Struck-through reference price. Equals `price` when the page shows none.
    pub mrp: u64,
    pub image: String,
    pub seller: String,
    /// Leading token of the rating alt text, e.g. "4.3". "0" when absent.
    pub rating: String,
    pub reviews: String,
    /// At most 4 bullets.
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Risk {
    Low,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Certificate {
    Valid,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub month: String,
    pub price: u64,
}

/// Complete analysis payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub title: String,
    pub price: u64,
    pub mrp: u64,
    pub discount: u64,
    pub image: String,
    pub seller: String,
    pub rating: String,
    pub reviews: String,
    pub features: Vec<String>,
    pub score: i32,
    pub risk: Risk,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub price_history: Vec<PricePoint>,
    pub certificate: Certificate,
}

/// Wire shape of `/analyze`: either the full verdict or the single
/// generic failure object. Fetch failures of any kind collapse into
/// the latter; no distinct error codes are surfaced.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Report(Box<Verdict>),
    Blocked { error: &'static str },
}

impl AnalyzeResponse {
    pub fn blocked() -> Self {
        AnalyzeResponse::Blocked { error: "Blocked" }
    }
}
