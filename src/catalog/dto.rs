use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTestRequest {
    pub name: String,
    pub code: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub parameter_count: i32,
    pub special_instruction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}
