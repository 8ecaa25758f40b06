use std::sync::Arc;

use ascii_table::{Align, AsciiTable};
use clap::{Args, Subcommand};
use sqlx::SqlitePool;

use hangar::models::NewMachine;
use hangar::persistence::relational::MachineRelationalPersistence;
use hangar::services::MachineService;

use crate::output::cell;

#[derive(Args)]
pub struct MachineArgs {
    #[command(subcommand)]
    command: MachineCommand,
}

#[derive(Args)]
struct MachineFields {
    #[arg(long)]
    hostname: Option<String>,
    #[arg(long)]
    ip_address: Option<String>,
    #[arg(long)]
    vmid: Option<i64>,
    #[arg(long)]
    cpu: Option<i64>,
    #[arg(long)]
    ram: Option<i64>,
    #[arg(long)]
    disk: Option<i64>,
    #[arg(long)]
    service_id: Option<i64>,
}

#[derive(Subcommand)]
enum MachineCommand {
    /// create a machine
    Create(MachineFields),
    /// delete a machine
    Delete { id: i64 },
    /// list machines, optionally only those referencing a service
    List {
        #[arg(long)]
        service_id: Option<i64>,
    },
    /// show a machine as JSON
    Show { id: i64 },
    /// update the given fields on a machine; omitted fields keep their
    /// current value, so a column cannot be cleared to NULL from here
    Update {
        id: i64,
        #[command(flatten)]
        fields: MachineFields,
    },
}

pub async fn handlers(args: MachineArgs, db: Arc<SqlitePool>) -> anyhow::Result<()> {
    let machine_service = MachineService {
        persistence: Box::new(MachineRelationalPersistence { db }),
    };

    match args.command {
        MachineCommand::Create(fields) => {
            let machine = machine_service
                .create(NewMachine {
                    hostname: fields.hostname,
                    ip_address: fields.ip_address,
                    vmid: fields.vmid,
                    cpu: fields.cpu,
                    ram: fields.ram,
                    disk: fields.disk,
                    service_id: fields.service_id,
                })
                .await?;

            tracing::info!("machine {} created", machine.id);
            println!("{}", serde_json::to_string_pretty(&machine)?);

            Ok(())
        }
        MachineCommand::Delete { id } => {
            machine_service.delete(id).await?;

            tracing::info!("machine {id} deleted");

            Ok(())
        }
        MachineCommand::List { service_id } => {
            let machines = match service_id {
                Some(service_id) => machine_service.get_by_service_id(service_id).await?,
                None => machine_service.list().await?,
            };

            if machines.is_empty() {
                tracing::info!("no machines found");

                return Ok(());
            }

            let table_data: Vec<Vec<String>> = machines
                .into_iter()
                .map(|machine| {
                    vec![
                        machine.id.to_string(),
                        cell(&machine.hostname),
                        cell(&machine.ip_address),
                        cell(&machine.vmid),
                        cell(&machine.cpu),
                        cell(&machine.ram),
                        cell(&machine.disk),
                        cell(&machine.service_id),
                    ]
                })
                .collect();

            let mut ascii_table = AsciiTable::default();

            for (column, header) in [
                "ID",
                "HOSTNAME",
                "IP ADDRESS",
                "VMID",
                "CPU",
                "RAM",
                "DISK",
                "SERVICE ID",
            ]
            .into_iter()
            .enumerate()
            {
                ascii_table
                    .column(column)
                    .set_header(header)
                    .set_align(Align::Left);
            }

            ascii_table.print(table_data);

            Ok(())
        }
        MachineCommand::Show { id } => match machine_service.get_by_id(id).await? {
            Some(machine) => {
                println!("{}", serde_json::to_string_pretty(&machine)?);

                Ok(())
            }
            None => Err(anyhow::anyhow!("machine id {id} not found")),
        },
        MachineCommand::Update { id, fields } => {
            let mut machine = match machine_service.get_by_id(id).await? {
                Some(machine) => machine,
                None => return Err(anyhow::anyhow!("machine id {id} not found")),
            };

            if fields.hostname.is_some() {
                machine.hostname = fields.hostname;
            }
            if fields.ip_address.is_some() {
                machine.ip_address = fields.ip_address;
            }
            if fields.vmid.is_some() {
                machine.vmid = fields.vmid;
            }
            if fields.cpu.is_some() {
                machine.cpu = fields.cpu;
            }
            if fields.ram.is_some() {
                machine.ram = fields.ram;
            }
            if fields.disk.is_some() {
                machine.disk = fields.disk;
            }
            if fields.service_id.is_some() {
                machine.service_id = fields.service_id;
            }

            let machine = machine_service.update(&machine).await?;

            tracing::info!("machine {id} updated");
            println!("{}", serde_json::to_string_pretty(&machine)?);

            Ok(())
        }
    }
}
