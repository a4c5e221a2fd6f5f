//! Placeholder configuration values used across tests. None are real
//! credentials.

pub static TEST_IDENTITY_API_KEY: &str = "identity_api_key";

pub static TEST_CHECKOUT_SECRET_KEY: &str = "sk_test_checkout";

pub static TEST_ADMIN_TOKEN_SECRET: &str = "admin_token_secret";

pub static TEST_ADMIN_SETUP_KEY: &str = "admin_setup_key";

pub static TEST_PUBLIC_URL: &str = "http://localhost:3000";
