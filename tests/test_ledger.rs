use castdesk::models::{format_rfc3339, Appointment};
use castdesk::services::BookingLedger;
use uuid::Uuid;

fn ledger_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("castdesk_ledger_{}", Uuid::new_v4()))
}

fn appointment_at(hours: i64) -> Appointment {
    let start = time::OffsetDateTime::now_utc() + time::Duration::hours(hours);
    Appointment::new(
        Uuid::new_v4().to_string(),
        format_rfc3339(start),
        format_rfc3339(start + time::Duration::hours(1)),
        "Jane Doe".to_string(),
    )
}

#[tokio::test]
async fn listed_bookings_are_sorted_by_start() {
    let dir = ledger_dir();
    let ledger = BookingLedger::new(&dir);

    ledger.record("agent-1", &appointment_at(48)).await;
    ledger.record("agent-1", &appointment_at(24)).await;

    let listed = ledger.list("agent-1").await;
    assert_eq!(listed.len(), 2);
    assert!(listed[0].start_at < listed[1].start_at);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn past_bookings_are_pruned_from_storage_on_read() {
    let dir = ledger_dir();
    let ledger = BookingLedger::new(&dir);

    let past = appointment_at(-24);
    let future = appointment_at(24);
    ledger.record("agent-1", &past).await;
    ledger.record("agent-1", &future).await;

    let listed = ledger.list("agent-1").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, future.id);

    // The pruned list was written back, not just filtered in memory
    let raw = std::fs::read_to_string(dir.join("agent-1.json")).unwrap();
    let stored: Vec<Appointment> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, future.id);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn corrupt_storage_reads_as_empty() {
    let dir = ledger_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("agent-1.json"), "{not json").unwrap();

    let ledger = BookingLedger::new(&dir);
    assert!(ledger.list("agent-1").await.is_empty());

    // Recording over a corrupt payload starts a fresh list
    let future = appointment_at(24);
    ledger.record("agent-1", &future).await;
    let listed = ledger.list("agent-1").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, future.id);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn unknown_agents_and_devices_read_as_empty() {
    let dir = ledger_dir();
    let ledger = BookingLedger::new(&dir);

    assert!(ledger.list("agent-1").await.is_empty());
    assert!(ledger.list("../../etc/passwd").await.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn ledgers_are_scoped_per_device_and_per_agent() {
    let dir = ledger_dir();
    let ledger = BookingLedger::new(&dir);

    let phone = ledger.for_device("device-a");
    let laptop = ledger.for_device("device-b");

    let booking = appointment_at(24);
    phone.record("agent-1", &booking).await;
    phone.record("agent-2", &appointment_at(48)).await;

    assert_eq!(phone.list("agent-1").await.len(), 1);
    assert_eq!(phone.list("agent-2").await.len(), 1);
    assert!(laptop.list("agent-1").await.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}
