//! LINE webhook endpoint handler
//!
//! # Security
//!
//! Every request must carry an `X-Line-Signature` header matching the raw
//! body. Requests without a valid signature are rejected with 400 before the
//! body is parsed.

use super::{handler, schemas, security};
use crate::{consts, errors::WebhookError, metric, webhook::AppState};
use ntex::{util::Bytes, web};
use tracing::Instrument;

/// Webhook receiver endpoint (POST)
///
/// Events are processed before responding, failures of single events are
/// logged and still answered with 200 so LINE does not redeliver them.
#[web::post("/callback")]
pub async fn callback(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let signature = match req.headers().get(consts::LINE_SIGNATURE_HEADER) {
        Some(header_value) => match header_value.to_str() {
            Ok(s) => s,
            Err(_) => {
                logfire::warn!("Invalid X-Line-Signature header: not valid UTF-8");
                return Err(reject(WebhookError::InvalidSignature));
            }
        },
        None => {
            logfire::warn!("Missing X-Line-Signature header");
            return Err(reject(WebhookError::MissingSignature));
        }
    };

    if !security::verify_signature(signature, &body, &app_state.channel_secret) {
        return Err(reject(WebhookError::InvalidSignature));
    }

    let payload: schemas::WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            logfire::error!(
                "Failed to parse webhook payload: {error}",
                error = e.to_string()
            );
            return Err(reject(WebhookError::MalformedPayload(e.to_string())));
        }
    };

    let span = logfire::span!(
        "line webhook with {events} events",
        events = payload.events.len() as i64
    );

    if let Err(e) = handler::process_webhook(&payload, &app_state.line_client, &app_state.notifier)
        .instrument(span)
        .await
    {
        logfire::error!("Failed to process webhook: {error}", error = e.to_string());
    }

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body("OK"))
}

fn reject(err: WebhookError) -> web::Error {
    metric::incr_rejected_request_statds(err.reason());
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{ChatNotifier, MockChatNotifier},
        webhook::line::{
            client::{MessagingApi, MockMessagingApi},
            schemas::Profile,
            security::sign,
        },
    };
    use ntex::{http, web::test};

    const SECRET: &str = "line-secret";

    fn app_state(mock_line: MockMessagingApi, mock_notifier: MockChatNotifier) -> AppState {
        let line_client: Box<dyn MessagingApi> = Box::new(mock_line);
        let notifier: Box<dyn ChatNotifier> = Box::new(mock_notifier);
        AppState {
            channel_secret: SECRET.to_string(),
            line_client,
            notifier,
        }
    }

    fn untouched_state() -> AppState {
        let mut mock_line = MockMessagingApi::new();
        mock_line.expect_get_profile().never();
        mock_line.expect_get_content().never();
        let mut mock_notifier = MockChatNotifier::new();
        mock_notifier.expect_deliver().never();
        app_state(mock_line, mock_notifier)
    }

    #[ntex::test]
    async fn test_callback_relays_signed_text_event() {
        let mut mock_line = MockMessagingApi::new();
        mock_line.expect_get_profile().times(1).returning(|_, _, _| {
            Ok(Profile {
                display_name: "Alice".into(),
                user_id: "U1".into(),
                picture_url: None,
            })
        });
        let mut mock_notifier = MockChatNotifier::new();
        mock_notifier
            .expect_deliver()
            .withf(|notification| notification.text_body == "[bot-line] Alice\nhello\n---\n")
            .times(1)
            .returning(|_| Ok(()));

        let app = test::init_service(
            web::App::new()
                .state(app_state(mock_line, mock_notifier))
                .service(callback),
        )
        .await;

        let body = r#"{"destination":"Ubot","events":[{"type":"message","source":{"type":"user","userId":"U1"},"message":{"type":"text","id":"m1","text":"hello"}}]}"#;
        let req = test::TestRequest::post()
            .uri("/callback")
            .header(consts::LINE_SIGNATURE_HEADER, sign(body.as_bytes(), SECRET))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(test::read_body(resp).await, Bytes::from_static(b"OK"));
    }

    #[ntex::test]
    async fn test_callback_rejects_bad_signature() {
        let app = test::init_service(web::App::new().state(untouched_state()).service(callback))
            .await;

        let body = r#"{"destination":"Ubot","events":[]}"#;
        let req = test::TestRequest::post()
            .uri("/callback")
            .header(consts::LINE_SIGNATURE_HEADER, sign(body.as_bytes(), "other-secret"))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn test_callback_rejects_missing_signature() {
        let app = test::init_service(web::App::new().state(untouched_state()).service(callback))
            .await;

        let req = test::TestRequest::post()
            .uri("/callback")
            .set_payload(r#"{"destination":"Ubot","events":[]}"#)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn test_callback_rejects_malformed_body() {
        let app = test::init_service(web::App::new().state(untouched_state()).service(callback))
            .await;

        let body = "not json";
        let req = test::TestRequest::post()
            .uri("/callback")
            .header(consts::LINE_SIGNATURE_HEADER, sign(body.as_bytes(), SECRET))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }

    #[ntex::test]
    async fn test_callback_accepts_empty_verification_request() {
        let app = test::init_service(web::App::new().state(untouched_state()).service(callback))
            .await;

        let body = r#"{"destination":"Ubot","events":[]}"#;
        let req = test::TestRequest::post()
            .uri("/callback")
            .header(consts::LINE_SIGNATURE_HEADER, sign(body.as_bytes(), SECRET))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::OK);
    }
}
