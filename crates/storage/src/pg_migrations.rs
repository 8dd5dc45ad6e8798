//! PostgreSQL schema for prepdesk. Every statement is idempotent.

use sqlx::PgPool;

use crate::error::StorageError;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS prospects (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        country TEXT NOT NULL,
        product_interest TEXT NOT NULL,
        message TEXT,
        ai_resources JSONB NOT NULL DEFAULT '[]',
        resources_completed JSONB NOT NULL DEFAULT '[]',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales_reps (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS meetings (
        id BIGSERIAL PRIMARY KEY,
        prospect_id BIGINT NOT NULL REFERENCES prospects (id),
        sales_rep_id BIGINT NOT NULL REFERENCES sales_reps (id),
        meeting_date TIMESTAMPTZ NOT NULL,
        status TEXT NOT NULL DEFAULT 'scheduled',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS meeting_ai_chat (
        meeting_id BIGINT PRIMARY KEY REFERENCES meetings (id),
        messages JSONB NOT NULL DEFAULT '[]',
        game_plan TEXT,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id BIGSERIAL PRIMARY KEY,
        user_kind TEXT NOT NULL,
        user_id TEXT NOT NULL,
        event_type TEXT NOT NULL,
        event_name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_meetings_rep_date ON meetings (sales_rep_id, meeting_date)",
    "CREATE INDEX IF NOT EXISTS idx_meetings_prospect_date ON meetings (prospect_id, meeting_date DESC)",
    "CREATE INDEX IF NOT EXISTS idx_meetings_date ON meetings (meeting_date)",
    "CREATE INDEX IF NOT EXISTS idx_events_user ON events (user_kind, user_id)",
];

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }
    tracing::info!("PostgreSQL migrations completed");
    Ok(())
}
