use serde::Serialize;

pub mod contact;

/// Body of every unsuccessful response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSuccess {
    pub success: bool,
    pub message: &'static str,
}

impl ApiSuccess {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
