use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    /// The content host answered with a non-2xx status.
    Upstream { url: String, status: u16 },
    /// Fetched content did not match the expected shape.
    Validation(Vec<FieldError>),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upstream { url, status } => {
                write!(f, "upstream request for {} failed with status {}", url, status)
            }
            AppError::Validation(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => {
                serde_json::json!({
                    "error": "Upstream content failed validation",
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // A missing document upstream is a missing resource here.
            AppError::Upstream { status: 404, .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::Validation(field_errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.url() {
            Some(url) => AppError::Internal(format!("Request to {} failed: {}", url, err)),
            None => AppError::Internal(format!("Request failed: {}", err)),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Validation(vec![FieldError {
            field: "frontmatter".to_string(),
            message: err.to_string(),
        }])
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_carries_url_and_status() {
        let err = AppError::Upstream {
            url: "https://raw.example.com/posts/missing-post/index.md".to_string(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("missing-post"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn upstream_404_maps_to_not_found() {
        let err = AppError::Upstream { url: "x".into(), status: 404 };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::Upstream { url: "x".into(), status: 500 };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_lists_offending_field() {
        let err = AppError::field("title", "must not be empty");
        assert!(err.to_string().contains("title"));
    }
}
