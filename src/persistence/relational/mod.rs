mod machine;
mod service;

pub use machine::MachineRelationalPersistence;
pub use service::ServiceRelationalPersistence;

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    // Single connection so the in-memory database is shared for the whole test.
    pub async fn migrated_pool() -> Arc<SqlitePool> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        crate::schema::migrate(&pool).await.unwrap();

        Arc::new(pool)
    }
}
