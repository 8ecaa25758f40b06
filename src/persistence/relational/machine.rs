use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::Machine;
use crate::persistence::{MachinePersistence, Persistence};

#[derive(Debug)]
pub struct MachineRelationalPersistence {
    pub db: Arc<SqlitePool>,
}

#[async_trait]
impl Persistence<Machine> for MachineRelationalPersistence {
    #[tracing::instrument(name = "relational::machine::create", skip_all)]
    async fn create(&self, machine: &Machine) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO machines
               (hostname, ip_address, vmid, cpu, ram, disk, created_at, updated_at, service_id)
            VALUES
               (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&machine.hostname)
        .bind(&machine.ip_address)
        .bind(machine.vmid)
        .bind(machine.cpu)
        .bind(machine.ram)
        .bind(machine.disk)
        .bind(machine.created_at)
        .bind(machine.updated_at)
        .bind(machine.service_id)
        .execute(&*self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    #[tracing::instrument(name = "relational::machine::update", skip_all)]
    async fn update(&self, machine: &Machine) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE machines SET
               hostname = ?, ip_address = ?, vmid = ?, cpu = ?, ram = ?, disk = ?,
               created_at = ?, updated_at = ?, service_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&machine.hostname)
        .bind(&machine.ip_address)
        .bind(machine.vmid)
        .bind(machine.cpu)
        .bind(machine.ram)
        .bind(machine.disk)
        .bind(machine.created_at)
        .bind(machine.updated_at)
        .bind(machine.service_id)
        .bind(machine.id)
        .execute(&*self.db)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "relational::machine::delete", skip_all)]
    async fn delete(&self, machine_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM machines WHERE id = ?")
            .bind(machine_id)
            .execute(&*self.db)
            .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "relational::machine::get_by_id", skip_all)]
    async fn get_by_id(&self, machine_id: i64) -> anyhow::Result<Option<Machine>> {
        let machine = sqlx::query_as::<_, Machine>("SELECT * FROM machines WHERE id = ?")
            .bind(machine_id)
            .fetch_optional(&*self.db)
            .await?;

        Ok(machine)
    }

    #[tracing::instrument(name = "relational::machine::list", skip_all)]
    async fn list(&self) -> anyhow::Result<Vec<Machine>> {
        let machines = sqlx::query_as::<_, Machine>("SELECT * FROM machines ORDER BY id")
            .fetch_all(&*self.db)
            .await?;

        Ok(machines)
    }
}

#[async_trait]
impl MachinePersistence for MachineRelationalPersistence {
    #[tracing::instrument(name = "relational::machine::get_by_service_id", skip_all)]
    async fn get_by_service_id(&self, service_id: i64) -> anyhow::Result<Vec<Machine>> {
        let machines =
            sqlx::query_as::<_, Machine>("SELECT * FROM machines WHERE service_id = ? ORDER BY id")
                .bind(service_id)
                .fetch_all(&*self.db)
                .await?;

        Ok(machines)
    }
}
