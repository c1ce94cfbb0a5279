mod helpers;

use helpers::*;

use castdesk::api::middleware::error::ApiError;
use castdesk::models::{CreateSlotRequest, UpdateSlotRequest};
use castdesk::services::BookingService;

fn slot_request(start_at: String, end_at: String) -> CreateSlotRequest {
    CreateSlotRequest {
        start_at,
        end_at,
        title: None,
        description: None,
    }
}

#[tokio::test]
async fn creating_a_slot_defaults_to_available() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let service = BookingService::new(db.clone());

    let agent = create_test_agent(db, "carla@agency.test").await;

    let slot = service
        .create_slot(
            &agent.id,
            CreateSlotRequest {
                start_at: hours_from_now(24),
                end_at: hours_from_now(25),
                title: Some("Casting".to_string()),
                description: Some("Studio B".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(slot.is_available);
    assert_eq!(slot.agent_id, agent.id);
    assert_eq!(slot.title.as_deref(), Some("Casting"));

    let stored = db.get_slot_by_id(&slot.id).await.unwrap().unwrap();
    assert_eq!(stored.start_at, slot.start_at);

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn slot_creation_rejects_invalid_intervals() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let service = BookingService::new(db.clone());

    let agent = create_test_agent(db, "carla@agency.test").await;

    // End before start
    let result = service
        .create_slot(&agent.id, slot_request(hours_from_now(25), hours_from_now(24)))
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    // Past-dated start
    let result = service
        .create_slot(&agent.id, slot_request(hours_from_now(-2), hours_from_now(2)))
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn only_the_owner_can_update_a_slot() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let service = BookingService::new(db.clone());

    let carla = create_test_agent(db, "carla@agency.test").await;
    let dario = create_test_agent(db, "dario@agency.test").await;
    let slot = create_test_slot(db, &carla.id, 24, 25).await;

    let updated = service
        .update_slot(
            &carla.id,
            &slot.id,
            UpdateSlotRequest {
                title: Some("Fitting".to_string()),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("Fitting"));
    assert!(!updated.is_available);

    let result = service
        .update_slot(
            &dario.id,
            &slot.id,
            UpdateSlotRequest {
                is_available: Some(true),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::NotOwner(_))));

    // The foreign update left the row untouched
    let stored = db.get_slot_by_id(&slot.id).await.unwrap().unwrap();
    assert!(!stored.is_available);

    let result = service
        .update_slot(&carla.id, "no-such-slot", UpdateSlotRequest::default())
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn slot_update_revalidates_the_interval() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let service = BookingService::new(db.clone());

    let agent = create_test_agent(db, "carla@agency.test").await;
    let slot = create_test_slot(db, &agent.id, 24, 25).await;

    let result = service
        .update_slot(
            &agent.id,
            &slot.id,
            UpdateSlotRequest {
                end_at: Some(hours_from_now(23)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn only_the_owner_can_delete_a_slot() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let service = BookingService::new(db.clone());

    let carla = create_test_agent(db, "carla@agency.test").await;
    let dario = create_test_agent(db, "dario@agency.test").await;
    let slot = create_test_slot(db, &carla.id, 24, 25).await;

    let result = service.delete_slot(&dario.id, &slot.id).await;
    assert!(matches!(result, Err(ApiError::NotOwner(_))));
    assert!(db.get_slot_by_id(&slot.id).await.unwrap().is_some());

    service.delete_slot(&carla.id, &slot.id).await.unwrap();
    assert!(db.get_slot_by_id(&slot.id).await.unwrap().is_none());

    teardown_test_db(test_db).await;
}
