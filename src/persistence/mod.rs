use async_trait::async_trait;

use crate::models::{Machine, Service};

pub mod memory;
pub mod relational;

#[async_trait]
pub trait Persistence<Model>: Send + Sync {
    async fn create(&self, model: &Model) -> anyhow::Result<i64>;
    async fn update(&self, model: &Model) -> anyhow::Result<u64>;
    async fn delete(&self, model_id: i64) -> anyhow::Result<u64>;
    async fn get_by_id(&self, model_id: i64) -> anyhow::Result<Option<Model>>;
    async fn list(&self) -> anyhow::Result<Vec<Model>>;
}

pub trait PersistableModel: Clone + Send + Sync {
    fn get_id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

#[async_trait]
pub trait MachinePersistence: Send + Sync + Persistence<Machine> {
    /// Lookup backed by `index_machines_on_service_id`.
    async fn get_by_service_id(&self, service_id: i64) -> anyhow::Result<Vec<Machine>>;
}

#[async_trait]
pub trait ServicePersistence: Send + Sync + Persistence<Service> {
    /// Names carry no uniqueness constraint, so this can match several rows.
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Vec<Service>>;
}
