use serde::Serialize;

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub ok: bool,
    /// Machine-readable error code
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_seconds: Option<u64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            message: message.into(),
            count: None,
            limit: None,
            window_seconds: None,
        }
    }

    pub fn with_rate_limit(mut self, count: usize, limit: usize, window_seconds: u64) -> Self {
        self.count = Some(count);
        self.limit = Some(limit);
        self.window_seconds = Some(window_seconds);
        self
    }
}
