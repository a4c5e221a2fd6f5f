use sea_orm::DatabaseConnection;

use crate::provider::{checkout::CheckoutClient, identity::IdentityClient};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub identity: IdentityClient,
    /// None when the payment integration is not configured.
    pub checkout: Option<CheckoutClient>,
    pub admin_token_secret: String,
    pub admin_setup_key: String,
    pub public_url: String,
}
