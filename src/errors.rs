use derive_more::{Display, Error};
use ntex::{http, web};

/// Errors that reject an inbound webhook request before any processing
#[derive(Debug, Display, Error)]
pub enum WebhookError {
    MissingSignature,
    InvalidSignature,
    MalformedPayload(#[error(not(source))] String),
}

impl WebhookError {
    fn get_error_message(&self) -> String {
        match self {
            WebhookError::MissingSignature => "[MissingSignature]".to_string(),
            WebhookError::InvalidSignature => "[InvalidSignature]".to_string(),
            WebhookError::MalformedPayload(msg) => format!("[MalformedPayload] {:#?}", msg),
        }
    }

    /// Short reason used as a metric attribute
    pub fn reason(&self) -> &'static str {
        match self {
            WebhookError::MissingSignature => "missing_signature",
            WebhookError::InvalidSignature => "invalid_signature",
            WebhookError::MalformedPayload(_) => "malformed_payload",
        }
    }
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        tracing::warn!("{}", self.get_error_message());

        let body = match self {
            WebhookError::MissingSignature => "missing signature",
            WebhookError::InvalidSignature => "invalid signature",
            WebhookError::MalformedPayload(_) => "malformed payload",
        };

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/plain; charset=utf-8")
            .body(body)
    }

    fn status_code(&self) -> http::StatusCode {
        http::StatusCode::BAD_REQUEST
    }
}
