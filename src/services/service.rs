use crate::models::{timestamp_now, NewService, Service};
use crate::persistence::ServicePersistence;

pub struct ServiceService {
    pub persistence: Box<dyn ServicePersistence>,
}

impl ServiceService {
    #[tracing::instrument(name = "service::create", skip_all)]
    pub async fn create(&self, new_service: NewService) -> anyhow::Result<Service> {
        let service = Service::new(new_service, timestamp_now());

        let service_id = self.persistence.create(&service).await?;

        match self.persistence.get_by_id(service_id).await? {
            Some(service) => Ok(service),
            None => Err(anyhow::anyhow!(
                "couldn't find created service id {service_id}"
            )),
        }
    }

    #[tracing::instrument(name = "service::update", skip_all)]
    pub async fn update(&self, service: &Service) -> anyhow::Result<Service> {
        let mut service = service.clone();
        service.updated_at = timestamp_now();

        let updated_count = self.persistence.update(&service).await?;

        if updated_count == 0 {
            return Err(anyhow::anyhow!("service id {} not found", service.id));
        }

        Ok(service)
    }

    /// Deleting a service never touches the machines that reference it; the
    /// schema declares no cascade, so their `service_id` is left dangling.
    #[tracing::instrument(name = "service::delete", skip_all)]
    pub async fn delete(&self, service_id: i64) -> anyhow::Result<()> {
        let deleted_count = self.persistence.delete(service_id).await?;

        if deleted_count == 0 {
            return Err(anyhow::anyhow!("service id {service_id} not found"));
        }

        Ok(())
    }

    pub async fn get_by_id(&self, service_id: i64) -> anyhow::Result<Option<Service>> {
        self.persistence.get_by_id(service_id).await
    }

    pub async fn get_by_name(&self, name: &str) -> anyhow::Result<Vec<Service>> {
        self.persistence.get_by_name(name).await
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Service>> {
        self.persistence.list().await
    }
}
