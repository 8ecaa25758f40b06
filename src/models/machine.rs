use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::persistence::PersistableModel;

/// A provisioned host or virtual machine. The schema leaves every business
/// column nullable; only the two timestamps are required.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, sqlx::FromRow)]
pub struct Machine {
    pub id: i64,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub vmid: Option<i64>,
    pub cpu: Option<i64>,
    pub ram: Option<i64>,
    pub disk: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    /// Weak reference to an owning service. No foreign key is declared, so
    /// the referenced service is not guaranteed to exist.
    pub service_id: Option<i64>,
}

/// Column values for a machine that has not been persisted yet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewMachine {
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub vmid: Option<i64>,
    pub cpu: Option<i64>,
    pub ram: Option<i64>,
    pub disk: Option<i64>,
    pub service_id: Option<i64>,
}

impl Machine {
    pub fn new(new_machine: NewMachine, timestamp: NaiveDateTime) -> Self {
        Self {
            id: 0,
            hostname: new_machine.hostname,
            ip_address: new_machine.ip_address,
            vmid: new_machine.vmid,
            cpu: new_machine.cpu,
            ram: new_machine.ram,
            disk: new_machine.disk,
            created_at: timestamp,
            updated_at: timestamp,
            service_id: new_machine.service_id,
        }
    }
}

impl PersistableModel for Machine {
    fn get_id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
