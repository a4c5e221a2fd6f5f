use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the payment processor integration.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Checkout API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Inputs for one hosted checkout session.
pub struct CheckoutSessionParams<'a> {
    /// Integer minor units (cents), rounded half away from zero upstream.
    pub amount_minor: i64,
    pub currency: &'a str,
    pub product_name: &'a str,
    pub product_description: &'a str,
    pub expense_id: i32,
    pub user_id: i32,
    pub success_url: String,
    pub cancel_url: String,
}

/// Hosted checkout session as reported by the processor.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Redirect URL the client completes payment at, out-of-band.
    pub url: String,
    pub payment_intent: Option<String>,
}

/// Client for the payment processor's hosted-checkout API.
#[derive(Clone)]
pub struct CheckoutClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl CheckoutClient {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Create a card checkout session scoped to exactly one line item.
    pub async fn create_session(
        &self,
        params: CheckoutSessionParams<'_>,
    ) -> Result<CheckoutSession, CheckoutError> {
        let amount_minor = params.amount_minor.to_string();
        let expense_id = params.expense_id.to_string();
        let user_id = params.user_id.to_string();

        let form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", params.currency),
            ("line_items[0][price_data][unit_amount]", &amount_minor),
            (
                "line_items[0][price_data][product_data][name]",
                params.product_name,
            ),
            (
                "line_items[0][price_data][product_data][description]",
                params.product_description,
            ),
            ("metadata[expense_id]", &expense_id),
            ("metadata[user_id]", &user_id),
            ("success_url", &params.success_url),
            ("cancel_url", &params.cancel_url),
        ];

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();

            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session = response.json().await?;

        Ok(session)
    }
}
