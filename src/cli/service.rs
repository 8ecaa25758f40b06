use std::sync::Arc;

use ascii_table::{Align, AsciiTable};
use clap::{Args, Subcommand};
use sqlx::SqlitePool;

use hangar::models::NewService;
use hangar::persistence::relational::ServiceRelationalPersistence;
use hangar::services::ServiceService;

use crate::output::cell;

#[derive(Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    command: ServiceCommand,
}

#[derive(Args)]
struct ServiceFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    scale: Option<i64>,
    #[arg(long)]
    cpu: Option<i64>,
    #[arg(long)]
    ram: Option<i64>,
    #[arg(long)]
    disk: Option<i64>,
    #[arg(long)]
    hostname: Option<String>,
    #[arg(long)]
    domain: Option<String>,
}

#[derive(Subcommand)]
enum ServiceCommand {
    /// create a service
    Create(ServiceFields),
    /// delete a service (machines referencing it are left untouched)
    Delete { id: i64 },
    /// list services, optionally only those with a given name
    List {
        #[arg(long)]
        name: Option<String>,
    },
    /// show a service as JSON
    Show { id: i64 },
    /// update the given fields on a service; omitted fields keep their
    /// current value, so a column cannot be cleared to NULL from here
    Update {
        id: i64,
        #[command(flatten)]
        fields: ServiceFields,
    },
}

pub async fn handlers(args: ServiceArgs, db: Arc<SqlitePool>) -> anyhow::Result<()> {
    let service_service = ServiceService {
        persistence: Box::new(ServiceRelationalPersistence { db }),
    };

    match args.command {
        ServiceCommand::Create(fields) => {
            let service = service_service
                .create(NewService {
                    name: fields.name,
                    scale: fields.scale,
                    cpu: fields.cpu,
                    ram: fields.ram,
                    disk: fields.disk,
                    hostname: fields.hostname,
                    domain: fields.domain,
                })
                .await?;

            tracing::info!("service {} created", service.id);
            println!("{}", serde_json::to_string_pretty(&service)?);

            Ok(())
        }
        ServiceCommand::Delete { id } => {
            service_service.delete(id).await?;

            tracing::info!("service {id} deleted");

            Ok(())
        }
        ServiceCommand::List { name } => {
            let services = match name {
                Some(name) => service_service.get_by_name(&name).await?,
                None => service_service.list().await?,
            };

            if services.is_empty() {
                tracing::info!("no services found");

                return Ok(());
            }

            let table_data: Vec<Vec<String>> = services
                .into_iter()
                .map(|service| {
                    vec![
                        service.id.to_string(),
                        cell(&service.name),
                        cell(&service.scale),
                        cell(&service.cpu),
                        cell(&service.ram),
                        cell(&service.disk),
                        cell(&service.hostname),
                        cell(&service.domain),
                    ]
                })
                .collect();

            let mut ascii_table = AsciiTable::default();

            for (column, header) in [
                "ID", "NAME", "SCALE", "CPU", "RAM", "DISK", "HOSTNAME", "DOMAIN",
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
        ServiceCommand::Show { id } => match service_service.get_by_id(id).await? {
            Some(service) => {
                println!("{}", serde_json::to_string_pretty(&service)?);

                Ok(())
            }
            None => Err(anyhow::anyhow!("service id {id} not found")),
        },
        ServiceCommand::Update { id, fields } => {
            let mut service = match service_service.get_by_id(id).await? {
                Some(service) => service,
                None => return Err(anyhow::anyhow!("service id {id} not found")),
            };

            if fields.name.is_some() {
                service.name = fields.name;
            }
            if fields.scale.is_some() {
                service.scale = fields.scale;
            }
            if fields.cpu.is_some() {
                service.cpu = fields.cpu;
            }
            if fields.ram.is_some() {
                service.ram = fields.ram;
            }
            if fields.disk.is_some() {
                service.disk = fields.disk;
            }
            if fields.hostname.is_some() {
                service.hostname = fields.hostname;
            }
            if fields.domain.is_some() {
                service.domain = fields.domain;
            }

            let service = service_service.update(&service).await?;

            tracing::info!("service {id} updated");
            println!("{}", serde_json::to_string_pretty(&service)?);

            Ok(())
        }
    }
}
