use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::Service;
use crate::persistence::{Persistence, ServicePersistence};

#[derive(Debug)]
pub struct ServiceRelationalPersistence {
    pub db: Arc<SqlitePool>,
}

#[async_trait]
impl Persistence<Service> for ServiceRelationalPersistence {
    #[tracing::instrument(name = "relational::service::create", skip_all)]
    async fn create(&self, service: &Service) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO services
               (name, scale, cpu, ram, disk, hostname, domain, created_at, updated_at)
            VALUES
               (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.name)
        .bind(service.scale)
        .bind(service.cpu)
        .bind(service.ram)
        .bind(service.disk)
        .bind(&service.hostname)
        .bind(&service.domain)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&*self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    #[tracing::instrument(name = "relational::service::update", skip_all)]
    async fn update(&self, service: &Service) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE services SET
               name = ?, scale = ?, cpu = ?, ram = ?, disk = ?, hostname = ?, domain = ?,
               created_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.name)
        .bind(service.scale)
        .bind(service.cpu)
        .bind(service.ram)
        .bind(service.disk)
        .bind(&service.hostname)
        .bind(&service.domain)
        .bind(service.created_at)
        .bind(service.updated_at)
        .bind(service.id)
        .execute(&*self.db)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "relational::service::delete", skip_all)]
    async fn delete(&self, service_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(service_id)
            .execute(&*self.db)
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "relational::service::get_by_id", skip_all)]
    async fn get_by_id(&self, service_id: i64) -> anyhow::Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(service_id)
            .fetch_optional(&*self.db)
            .await?;

        Ok(service)
    }

    #[tracing::instrument(name = "relational::service::list", skip_all)]
    async fn list(&self) -> anyhow::Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id")
            .fetch_all(&*self.db)
            .await?;

        Ok(services)
    }
}

#[async_trait]
impl ServicePersistence for ServiceRelationalPersistence {
    #[tracing::instrument(name = "relational::service::get_by_name", skip_all)]
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Vec<Service>> {
        let services =
            sqlx::query_as::<_, Service>("SELECT * FROM services WHERE name = ? ORDER BY id")
                .bind(name)
                .fetch_all(&*self.db)
                .await?;

        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp_now, NewService};
    use crate::persistence::relational::tests::migrated_pool;

    fn new_service_fixture() -> Service {
        Service::new(
            NewService {
                name: Some("billing".to_string()),
                scale: Some(3),
                cpu: Some(2),
                ram: Some(4096),
                disk: Some(32),
                hostname: Some("billing".to_string()),
                domain: Some("example.com".to_string()),
            },
            timestamp_now(),
        )
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let db = migrated_pool().await;
        let service_persistence = ServiceRelationalPersistence { db };

        let service = new_service_fixture();
        let service_id = service_persistence.create(&service).await.unwrap();
        assert!(service_id > 0);

        let mut fetched_service = service_persistence
            .get_by_id(service_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched_service.name, service.name);
        assert_eq!(fetched_service.scale, Some(3));

        fetched_service.scale = Some(5);
        let updated_count = service_persistence.update(&fetched_service).await.unwrap();
        assert_eq!(updated_count, 1);

        let refetched_service = service_persistence
            .get_by_id(service_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(refetched_service.scale, Some(5));

        let deleted_count = service_persistence.delete(service_id).await.unwrap();
        assert_eq!(deleted_count, 1);
    }

    #[tokio::test]
    async fn test_get_by_name_matches_duplicates() {
        let db = migrated_pool().await;
        let service_persistence = ServiceRelationalPersistence { db };

        let service = new_service_fixture();
        service_persistence.create(&service).await.unwrap();
        service_persistence.create(&service).await.unwrap();

        let services = service_persistence.get_by_name("billing").await.unwrap();
        assert_eq!(services.len(), 2);

        let services = service_persistence.get_by_name("metrics").await.unwrap();
        assert!(services.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_service_affects_no_rows() {
        let db = migrated_pool().await;
        let service_persistence = ServiceRelationalPersistence { db };

        let mut service = new_service_fixture();
        service.id = 42;

        let updated_count = service_persistence.update(&service).await.unwrap();
        assert_eq!(updated_count, 0);
    }
}
