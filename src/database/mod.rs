use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

pub mod agents;
pub mod appointments;
pub mod sessions;
pub mod slots;

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(20)
            .min_connections(1)
            .connect(database_url)
            .await?;

        // Enable foreign keys for SQLite
        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS agents (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        agent_id TEXT NOT NULL,
        token TEXT NOT NULL UNIQUE,
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY (agent_id) REFERENCES agents(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS slots (
        id TEXT PRIMARY KEY,
        agent_id TEXT NOT NULL,
        start_at TEXT NOT NULL,
        end_at TEXT NOT NULL,
        title TEXT,
        description TEXT,
        is_available INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (agent_id) REFERENCES agents(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS appointments (
        id TEXT PRIMARY KEY,
        slot_id TEXT NOT NULL,
        start_at TEXT NOT NULL,
        end_at TEXT NOT NULL,
        model_name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        instagram TEXT,
        notes TEXT,
        created_at TEXT NOT NULL,
        viewed_at TEXT,
        UNIQUE(slot_id, start_at, end_at),
        FOREIGN KEY (slot_id) REFERENCES slots(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_slots_agent_start ON slots(agent_id, start_at)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_slot ON appointments(slot_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_viewed ON appointments(viewed_at)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_token ON sessions(token)",
];
