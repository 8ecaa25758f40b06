use clap::{Args, Subcommand};
use sqlx::SqlitePool;

#[derive(Args)]
pub struct DbArgs {
    #[command(subcommand)]
    command: DbCommand,
}

#[derive(Subcommand)]
enum DbCommand {
    /// apply pending schema migrations
    Migrate,
    /// check the live schema against the declared shape
    Verify,
}

pub async fn handlers(args: DbArgs, db: &SqlitePool) -> anyhow::Result<()> {
    match args.command {
        DbCommand::Migrate => {
            hangar::schema::migrate(db).await?;

            tracing::info!(
                "database migrated to schema version {}",
                hangar::schema::SCHEMA_VERSION
            );

            Ok(())
        }
        DbCommand::Verify => {
            hangar::schema::verify(db).await?;

            tracing::info!("schema matches the declared shape");

            Ok(())
        }
    }
}
