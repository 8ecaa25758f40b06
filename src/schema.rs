//! Declared shape of the inventory schema, the embedded migration runner,
//! and a verifier that checks a live database against the declaration.

use anyhow::bail;
use sqlx::{Row, SqlitePool};

/// Opaque migration-ordering token carried over from the schema source.
pub const SCHEMA_VERSION: i64 = 20210124174240;

pub const MACHINES_SERVICE_ID_INDEX: &str = "index_machines_on_service_id";

#[derive(Debug)]
pub struct ExpectedColumn {
    pub name: &'static str,
    pub declared_type: &'static str,
    pub not_null: bool,
}

#[derive(Debug)]
pub struct ExpectedTable {
    pub name: &'static str,
    pub columns: &'static [ExpectedColumn],
}

const fn column(name: &'static str, declared_type: &'static str, not_null: bool) -> ExpectedColumn {
    ExpectedColumn {
        name,
        declared_type,
        not_null,
    }
}

pub const MACHINES: ExpectedTable = ExpectedTable {
    name: "machines",
    columns: &[
        column("id", "INTEGER", false),
        column("hostname", "TEXT", false),
        column("ip_address", "TEXT", false),
        column("vmid", "INTEGER", false),
        column("cpu", "INTEGER", false),
        column("ram", "INTEGER", false),
        column("disk", "INTEGER", false),
        column("created_at", "DATETIME", true),
        column("updated_at", "DATETIME", true),
        column("service_id", "INTEGER", false),
    ],
};

pub const SERVICES: ExpectedTable = ExpectedTable {
    name: "services",
    columns: &[
        column("id", "INTEGER", false),
        column("name", "TEXT", false),
        column("scale", "INTEGER", false),
        column("cpu", "INTEGER", false),
        column("ram", "INTEGER", false),
        column("disk", "INTEGER", false),
        column("hostname", "TEXT", false),
        column("domain", "TEXT", false),
        column("created_at", "DATETIME", true),
        column("updated_at", "DATETIME", true),
    ],
};

#[tracing::instrument(name = "schema::migrate", skip_all)]
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}

/// Checks the live database against the declared shape: both tables with
/// exactly the declared columns, types and nullability, the one index, and
/// nothing else.
#[tracing::instrument(name = "schema::verify", skip_all)]
pub async fn verify(pool: &SqlitePool) -> anyhow::Result<()> {
    verify_table(pool, &MACHINES).await?;
    verify_table(pool, &SERVICES).await?;
    verify_machines_index(pool).await?;
    verify_no_extra_tables(pool).await?;

    Ok(())
}

async fn verify_table(pool: &SqlitePool, table: &ExpectedTable) -> anyhow::Result<()> {
    // PRAGMA arguments can't be bound; table names here come from constants.
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table.name))
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        bail!("table {} does not exist", table.name);
    }

    let actual_columns: Vec<(String, String, bool)> = rows
        .iter()
        .map(|row| {
            (
                row.get::<String, _>("name"),
                row.get::<String, _>("type"),
                row.get::<i64, _>("notnull") != 0,
            )
        })
        .collect();

    if actual_columns.len() != table.columns.len() {
        let actual_names: Vec<&str> = actual_columns
            .iter()
            .map(|(name, _, _)| name.as_str())
            .collect();
        bail!(
            "table {} has columns {actual_names:?}, expected {} columns",
            table.name,
            table.columns.len()
        );
    }

    for (expected, (actual_name, actual_type, actual_not_null)) in
        table.columns.iter().zip(actual_columns.iter())
    {
        if expected.name != actual_name {
            bail!(
                "table {}: expected column {} but found {actual_name}",
                table.name,
                expected.name
            );
        }

        if !expected.declared_type.eq_ignore_ascii_case(actual_type) {
            bail!(
                "column {}.{} is declared {actual_type}, expected {}",
                table.name,
                expected.name,
                expected.declared_type
            );
        }

        if expected.not_null != *actual_not_null {
            bail!(
                "column {}.{} nullability mismatch: NOT NULL is {actual_not_null}, expected {}",
                table.name,
                expected.name,
                expected.not_null
            );
        }
    }

    Ok(())
}

async fn verify_machines_index(pool: &SqlitePool) -> anyhow::Result<()> {
    let rows = sqlx::query("PRAGMA index_list(machines)")
        .fetch_all(pool)
        .await?;

    let index_exists = rows
        .iter()
        .any(|row| row.get::<String, _>("name") == MACHINES_SERVICE_ID_INDEX);

    if !index_exists {
        bail!("index {MACHINES_SERVICE_ID_INDEX} does not exist on machines");
    }

    let rows = sqlx::query(&format!("PRAGMA index_info({MACHINES_SERVICE_ID_INDEX})"))
        .fetch_all(pool)
        .await?;

    let indexed_columns: Vec<String> = rows
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect();

    if indexed_columns != ["service_id"] {
        bail!("index {MACHINES_SERVICE_ID_INDEX} covers {indexed_columns:?}, expected [service_id]");
    }

    Ok(())
}

async fn verify_no_extra_tables(pool: &SqlitePool) -> anyhow::Result<()> {
    let rows = sqlx::query(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
          AND name != '_sqlx_migrations'
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    let table_names: Vec<String> = rows
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect();

    if table_names != ["machines", "services"] {
        bail!("unexpected tables in schema: {table_names:?}");
    }

    Ok(())
}
