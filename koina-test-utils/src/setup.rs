use mockito::{Server, ServerGuard};
use sea_orm::{ConnectionTrait, Database, DbBackend, Schema};

use koina::{
    model::app::AppState,
    provider::{checkout::CheckoutClient, identity::IdentityClient},
};

use crate::{
    constant::{
        TEST_ADMIN_SETUP_KEY, TEST_ADMIN_TOKEN_SECRET, TEST_CHECKOUT_SECRET_KEY,
        TEST_IDENTITY_API_KEY, TEST_PUBLIC_URL,
    },
    error::TestError,
};

/// One mock HTTP server backs both external integrations; the identity and
/// checkout clients are pointed at different paths on it.
pub struct TestSetup {
    pub server: ServerGuard,
    pub state: AppState,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let server_url = server.url();

        let db = Database::connect("sqlite::memory:").await?;
        let schema = Schema::new(DbBackend::Sqlite);

        let stmts = vec![
            schema.create_table_from_entity(entity::prelude::User),
            schema.create_table_from_entity(entity::prelude::Building),
            schema.create_table_from_entity(entity::prelude::Apartment),
            schema.create_table_from_entity(entity::prelude::Expense),
            schema.create_table_from_entity(entity::prelude::Payment),
            schema.create_table_from_entity(entity::prelude::Notification),
            schema.create_table_from_entity(entity::prelude::Subscription),
            schema.create_table_from_entity(entity::prelude::SuperAdmin),
        ];
        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        let state = AppState {
            db,
            identity: IdentityClient::new(server_url.as_str(), TEST_IDENTITY_API_KEY),
            checkout: Some(CheckoutClient::new(
                server_url.as_str(),
                TEST_CHECKOUT_SECRET_KEY,
            )),
            admin_token_secret: TEST_ADMIN_TOKEN_SECRET.to_string(),
            admin_setup_key: TEST_ADMIN_SETUP_KEY.to_string(),
            public_url: TEST_PUBLIC_URL.to_string(),
        };

        Ok(Self { server, state })
    }

    /// Setup without the checkout integration, to exercise the 503 path.
    pub async fn without_checkout() -> Result<Self, TestError> {
        let mut setup = Self::new().await?;
        setup.state.checkout = None;

        Ok(setup)
    }
}

/// Convenience wrapper used by most tests.
pub async fn test_setup() -> TestSetup {
    TestSetup::new()
        .await
        .expect("failed to build test setup")
}
