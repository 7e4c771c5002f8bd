//! Schema bootstrap for the expenses table
//!
//! Every statement is idempotent, so this runs on each server start.
//! A table left behind by the earlier backend (INTEGER id, naive
//! TIMESTAMP, nullable columns, client-side timestamp default) is
//! upgraded in place to the shape the repository decodes.

use std::collections::HashMap;

use sqlx::PgPool;

/// Columns the repository decodes as non-optional
const REQUIRED_COLUMNS: [&str; 4] = ["user_email", "event_name", "cost", "\"timestamp\""];

/// Create the `expenses` table and its indexes if missing, and align an
/// older table's column types
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running expense migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS expenses (
            id BIGSERIAL PRIMARY KEY,
            user_email TEXT NOT NULL,
            event_name TEXT NOT NULL,
            cost DOUBLE PRECISION NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            receipt_url TEXT,
            name TEXT,
            role TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    upgrade_legacy_columns(pool).await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_expenses_user_email ON expenses (user_email)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_expenses_timestamp ON expenses (timestamp DESC)")
        .execute(pool)
        .await?;

    tracing::info!("Expense migrations complete");
    Ok(())
}

/// Column name → `information_schema` data type for `expenses`
async fn column_types(pool: &PgPool) -> Result<HashMap<String, String>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT column_name::text, data_type::text
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = 'expenses'
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

async fn upgrade_legacy_columns(pool: &PgPool) -> Result<(), sqlx::Error> {
    let types = column_types(pool).await?;

    if types.get("id").map(String::as_str) == Some("integer") {
        tracing::info!("Widening expenses.id to BIGINT");
        sqlx::query("ALTER TABLE expenses ALTER COLUMN id TYPE BIGINT")
            .execute(pool)
            .await?;
        sqlx::query(
            r#"
            DO $$
            DECLARE seq text := pg_get_serial_sequence('expenses', 'id');
            BEGIN
                IF seq IS NOT NULL THEN
                    EXECUTE format('ALTER SEQUENCE %s AS BIGINT', seq);
                END IF;
            END $$
            "#,
        )
        .execute(pool)
        .await?;
    }

    if types.get("timestamp").map(String::as_str) == Some("timestamp without time zone") {
        // Naive values were written as UTC
        tracing::info!("Converting expenses.timestamp to TIMESTAMPTZ");
        sqlx::query(
            r#"ALTER TABLE expenses ALTER COLUMN "timestamp" TYPE TIMESTAMPTZ USING "timestamp" AT TIME ZONE 'UTC'"#,
        )
        .execute(pool)
        .await?;
    }

    sqlx::query(r#"ALTER TABLE expenses ALTER COLUMN "timestamp" SET DEFAULT NOW()"#)
        .execute(pool)
        .await?;

    // Fails with "column ... contains null values" if old rows lack a value
    for column in REQUIRED_COLUMNS {
        sqlx::query(&format!("ALTER TABLE expenses ALTER COLUMN {column} SET NOT NULL"))
            .execute(pool)
            .await?;
    }

    Ok(())
}
