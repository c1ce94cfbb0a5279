use castdesk::database::Database;
use castdesk::models::{format_rfc3339, Agent, Slot};
use castdesk::services::auth::hash_password;
use uuid::Uuid;

pub struct TestDb {
    db: Database,
    path: std::path::PathBuf,
}

impl TestDb {
    pub fn db(&self) -> &Database {
        &self.db
    }
}

pub async fn setup_test_db() -> TestDb {
    // Unique file-based SQLite per test for parallel execution
    let path = std::env::temp_dir().join(format!("castdesk_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to apply test schema");

    TestDb { db, path }
}

pub async fn teardown_test_db(test_db: TestDb) {
    drop(test_db.db);
    std::fs::remove_file(&test_db.path).ok();
}

pub async fn create_test_agent(db: &Database, email: &str) -> Agent {
    let agent = Agent::new(
        email.to_string(),
        "Test".to_string(),
        hash_password("BookMe123!").unwrap(),
    );
    db.create_agent(&agent).await.unwrap();
    agent
}

/// RFC 3339 instant `hours` from now (negative for the past).
pub fn hours_from_now(hours: i64) -> String {
    format_rfc3339(time::OffsetDateTime::now_utc() + time::Duration::hours(hours))
}

/// Insert an available slot spanning [now + start_hours, now + end_hours).
/// Goes through the database directly so tests can seed past-dated slots.
pub async fn create_test_slot(db: &Database, agent_id: &str, start_hours: i64, end_hours: i64) -> Slot {
    let slot = Slot::new(
        agent_id.to_string(),
        hours_from_now(start_hours),
        hours_from_now(end_hours),
        None,
        None,
    );
    db.create_slot(&slot).await.unwrap();
    slot
}
