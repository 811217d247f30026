use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load settings for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database operation failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("No row with id {id} exists in table '{table}'.")]
    NotFound { table: &'static str, id: i32 },
}
