use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{
    config::Config,
    error::Error,
    model::app::AppState,
    provider::{checkout::CheckoutClient, identity::IdentityClient},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the shared application state from configuration.
pub async fn build_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;

    let identity = IdentityClient::new(
        config.identity_url.as_str(),
        config.identity_api_key.as_str(),
    );
    let checkout = config
        .checkout_secret_key
        .as_ref()
        .map(|secret_key| CheckoutClient::new(config.checkout_url.as_str(), secret_key.as_str()));
    if checkout.is_none() {
        tracing::warn!("CHECKOUT_SECRET_KEY not set; checkout endpoints will answer 503");
    }

    Ok(AppState {
        db,
        identity,
        checkout,
        admin_token_secret: config.admin_token_secret.clone(),
        admin_setup_key: config.admin_setup_key.clone(),
        public_url: config.public_url.clone(),
    })
}
