//! Mock HTTP endpoints for the identity provider and the payment processor.

use ::mockito::{Mock, ServerGuard};
use serde_json::json;

/// Identity provider accepts the bearer token and reports this subject.
pub fn mock_identity_user(
    server: &mut ServerGuard,
    subject: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Mock {
    server
        .mock("GET", "/auth/v1/user")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": subject,
                "email": email,
                "phone": phone,
            })
            .to_string(),
        )
        .create()
}

/// Identity provider rejects the bearer token.
pub fn mock_identity_rejection(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "invalid token" }).to_string())
        .create()
}

/// Payment processor opens a hosted checkout session.
pub fn mock_checkout_session(
    server: &mut ServerGuard,
    session_id: &str,
    payment_intent: Option<&str>,
) -> Mock {
    server
        .mock("POST", "/v1/checkout/sessions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": session_id,
                "url": format!("https://checkout.example.com/c/{session_id}"),
                "payment_intent": payment_intent,
            })
            .to_string(),
        )
        .create()
}

/// Payment processor rejects the session request.
pub fn mock_checkout_failure(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/v1/checkout/sessions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": { "message": "invalid amount" } }).to_string())
        .create()
}
