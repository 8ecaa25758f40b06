use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use async_trait::async_trait;

use crate::models::Service;
use crate::persistence::{PersistableModel, Persistence, ServicePersistence};

#[derive(Debug)]
pub struct ServiceMemoryPersistence {
    services: Arc<Mutex<HashMap<i64, Service>>>,
    next_id: AtomicI64,
}

#[async_trait]
impl Persistence<Service> for ServiceMemoryPersistence {
    async fn create(&self, service: &Service) -> anyhow::Result<i64> {
        let service_id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut service = service.clone();
        service.set_id(service_id);

        let mut locked_services = self.get_services_locked()?;
        locked_services.insert(service_id, service);

        Ok(service_id)
    }

    async fn update(&self, service: &Service) -> anyhow::Result<u64> {
        let mut locked_services = self.get_services_locked()?;

        match locked_services.get_mut(&service.get_id()) {
            Some(stored_service) => {
                *stored_service = service.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, service_id: i64) -> anyhow::Result<u64> {
        let mut locked_services = self.get_services_locked()?;

        match locked_services.remove(&service_id) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }

    async fn get_by_id(&self, service_id: i64) -> anyhow::Result<Option<Service>> {
        let locked_services = self.get_services_locked()?;

        Ok(locked_services.get(&service_id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Service>> {
        let locked_services = self.get_services_locked()?;

        let mut services: Vec<Service> = locked_services.values().cloned().collect();
        services.sort_by_key(|service| service.id);

        Ok(services)
    }
}

#[async_trait]
impl ServicePersistence for ServiceMemoryPersistence {
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Vec<Service>> {
        let locked_services = self.get_services_locked()?;

        let mut services: Vec<Service> = locked_services
            .values()
            .filter(|service| service.name.as_deref() == Some(name))
            .cloned()
            .collect();
        services.sort_by_key(|service| service.id);

        Ok(services)
    }
}

impl Default for ServiceMemoryPersistence {
    fn default() -> Self {
        Self {
            services: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl ServiceMemoryPersistence {
    fn get_services_locked(&self) -> anyhow::Result<MutexGuard<'_, HashMap<i64, Service>>> {
        match self.services.lock() {
            Ok(locked_services) => Ok(locked_services),
            Err(_) => Err(anyhow::anyhow!("failed to acquire services lock")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp_now, NewService};

    #[tokio::test]
    async fn test_create_get_by_name() {
        let service_persistence = ServiceMemoryPersistence::default();

        let service = Service::new(
            NewService {
                name: Some("billing".to_string()),
                scale: Some(3),
                ..Default::default()
            },
            timestamp_now(),
        );

        service_persistence.create(&service).await.unwrap();
        service_persistence.create(&service).await.unwrap();

        let services = service_persistence.get_by_name("billing").await.unwrap();
        assert_eq!(services.len(), 2);

        let services = service_persistence.get_by_name("metrics").await.unwrap();
        assert!(services.is_empty());
    }
}
