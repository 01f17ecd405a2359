use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    /// Row count when the result is an array, otherwise null.
    pub items: Option<usize>,
    pub data: Value,
}

impl ScrapeResponse {
    pub fn from_data(data: Value) -> Self {
        Self {
            success: true,
            items: data.as_array().map(Vec::len),
            data,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { success: false, error }
    }
}
