use std::sync::Arc;

use clap::{Parser, Subcommand};

mod db;
mod machine;
mod output;
mod service;

#[derive(Parser)]
#[command(name = "hangar", version, about = "machine and service inventory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// manage the inventory database itself
    Db(db::DbArgs),
    /// manage machines
    Machine(machine::MachineArgs),
    /// manage services
    Service(service::ServiceArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let database_url = dotenvy::var("DATABASE_URL")
        .unwrap_or_else(|_| hangar::db::DEFAULT_DATABASE_URL.to_string());
    let pool = Arc::new(hangar::db::connect(&database_url).await?);

    match cli.command {
        Command::Db(args) => db::handlers(args, &pool).await,
        Command::Machine(args) => {
            hangar::schema::migrate(&pool).await?;
            machine::handlers(args, pool).await
        }
        Command::Service(args) => {
            hangar::schema::migrate(&pool).await?;
            service::handlers(args, pool).await
        }
    }
}
