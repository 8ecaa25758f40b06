use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use async_trait::async_trait;

use crate::models::Machine;
use crate::persistence::{MachinePersistence, PersistableModel, Persistence};

#[derive(Debug)]
pub struct MachineMemoryPersistence {
    machines: Arc<Mutex<HashMap<i64, Machine>>>,
    next_id: AtomicI64,
}

#[async_trait]
impl Persistence<Machine> for MachineMemoryPersistence {
    async fn create(&self, machine: &Machine) -> anyhow::Result<i64> {
        let machine_id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut machine = machine.clone();
        machine.set_id(machine_id);

        let mut locked_machines = self.get_machines_locked()?;
        locked_machines.insert(machine_id, machine);

        Ok(machine_id)
    }

    async fn update(&self, machine: &Machine) -> anyhow::Result<u64> {
        let mut locked_machines = self.get_machines_locked()?;

        match locked_machines.get_mut(&machine.get_id()) {
            Some(stored_machine) => {
                *stored_machine = machine.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, machine_id: i64) -> anyhow::Result<u64> {
        let mut locked_machines = self.get_machines_locked()?;

        match locked_machines.remove(&machine_id) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }

    async fn get_by_id(&self, machine_id: i64) -> anyhow::Result<Option<Machine>> {
        let locked_machines = self.get_machines_locked()?;

        Ok(locked_machines.get(&machine_id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Machine>> {
        let locked_machines = self.get_machines_locked()?;

        let mut machines: Vec<Machine> = locked_machines.values().cloned().collect();
        machines.sort_by_key(|machine| machine.id);

        Ok(machines)
    }
}

#[async_trait]
impl MachinePersistence for MachineMemoryPersistence {
    async fn get_by_service_id(&self, service_id: i64) -> anyhow::Result<Vec<Machine>> {
        let locked_machines = self.get_machines_locked()?;

        let mut machines: Vec<Machine> = locked_machines
            .values()
            .filter(|machine| machine.service_id == Some(service_id))
            .cloned()
            .collect();
        machines.sort_by_key(|machine| machine.id);

        Ok(machines)
    }
}

impl Default for MachineMemoryPersistence {
    fn default() -> Self {
        Self {
            machines: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MachineMemoryPersistence {
    fn get_machines_locked(&self) -> anyhow::Result<MutexGuard<'_, HashMap<i64, Machine>>> {
        match self.machines.lock() {
            Ok(locked_machines) => Ok(locked_machines),
            Err(_) => Err(anyhow::anyhow!("failed to acquire machines lock")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp_now, NewMachine};

    #[tokio::test]
    async fn test_create_get_delete() {
        let machine_persistence = MachineMemoryPersistence::default();

        let machine = Machine::new(
            NewMachine {
                hostname: Some("pve-node-1".to_string()),
                service_id: Some(1),
                ..Default::default()
            },
            timestamp_now(),
        );

        let machine_id = machine_persistence.create(&machine).await.unwrap();

        let fetched_machine = machine_persistence
            .get_by_id(machine_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched_machine.id, machine_id);
        assert_eq!(fetched_machine.hostname, machine.hostname);

        let deleted_count = machine_persistence.delete(machine_id).await.unwrap();
        assert_eq!(deleted_count, 1);

        let deleted_count = machine_persistence.delete(machine_id).await.unwrap();
        assert_eq!(deleted_count, 0);
    }

    #[tokio::test]
    async fn test_get_by_service_id() {
        let machine_persistence = MachineMemoryPersistence::default();

        let mut machine = Machine::new(NewMachine::default(), timestamp_now());
        machine.service_id = Some(3);
        machine_persistence.create(&machine).await.unwrap();

        machine.service_id = None;
        machine_persistence.create(&machine).await.unwrap();

        let machines = machine_persistence.get_by_service_id(3).await.unwrap();
        assert_eq!(machines.len(), 1);
    }
}
