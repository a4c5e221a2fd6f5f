use thiserror::Error;

/// Errors surfaced while building test fixtures.
#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error("{0}")]
    Fixture(String),
}
