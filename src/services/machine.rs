use crate::models::{timestamp_now, Machine, NewMachine};
use crate::persistence::MachinePersistence;

/// Record-level operations for machines. The only behavior layered on top of
/// persistence is the timestamp discipline: both timestamps are stamped on
/// create and `updated_at` is bumped on every update.
pub struct MachineService {
    pub persistence: Box<dyn MachinePersistence>,
}

impl MachineService {
    #[tracing::instrument(name = "machine::create", skip_all)]
    pub async fn create(&self, new_machine: NewMachine) -> anyhow::Result<Machine> {
        let machine = Machine::new(new_machine, timestamp_now());

        let machine_id = self.persistence.create(&machine).await?;

        match self.persistence.get_by_id(machine_id).await? {
            Some(machine) => Ok(machine),
            None => Err(anyhow::anyhow!(
                "couldn't find created machine id {machine_id}"
            )),
        }
    }

    #[tracing::instrument(name = "machine::update", skip_all)]
    pub async fn update(&self, machine: &Machine) -> anyhow::Result<Machine> {
        let mut machine = machine.clone();
        machine.updated_at = timestamp_now();

        let updated_count = self.persistence.update(&machine).await?;

        if updated_count == 0 {
            return Err(anyhow::anyhow!("machine id {} not found", machine.id));
        }

        Ok(machine)
    }

    #[tracing::instrument(name = "machine::delete", skip_all)]
    pub async fn delete(&self, machine_id: i64) -> anyhow::Result<()> {
        let deleted_count = self.persistence.delete(machine_id).await?;

        if deleted_count == 0 {
            return Err(anyhow::anyhow!("machine id {machine_id} not found"));
        }

        Ok(())
    }

    pub async fn get_by_id(&self, machine_id: i64) -> anyhow::Result<Option<Machine>> {
        self.persistence.get_by_id(machine_id).await
    }

    pub async fn get_by_service_id(&self, service_id: i64) -> anyhow::Result<Vec<Machine>> {
        self.persistence.get_by_service_id(service_id).await
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Machine>> {
        self.persistence.list().await
    }
}
