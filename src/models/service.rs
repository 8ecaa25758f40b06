use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::persistence::PersistableModel;

/// A logical service definition: a desired scale plus the per-instance
/// resource request used when machines are provisioned for it. `ram` and
/// `disk` are opaque integers; the schema does not document their units.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub name: Option<String>,
    pub scale: Option<i64>,
    pub cpu: Option<i64>,
    pub ram: Option<i64>,
    pub disk: Option<i64>,
    pub hostname: Option<String>,
    pub domain: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column values for a service that has not been persisted yet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewService {
    pub name: Option<String>,
    pub scale: Option<i64>,
    pub cpu: Option<i64>,
    pub ram: Option<i64>,
    pub disk: Option<i64>,
    pub hostname: Option<String>,
    pub domain: Option<String>,
}

impl Service {
    pub fn new(new_service: NewService, timestamp: NaiveDateTime) -> Self {
        Self {
            id: 0,
            name: new_service.name,
            scale: new_service.scale,
            cpu: new_service.cpu,
            ram: new_service.ram,
            disk: new_service.disk,
            hostname: new_service.hostname,
            domain: new_service.domain,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

impl PersistableModel for Service {
    fn get_id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
