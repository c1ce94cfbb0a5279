mod helpers;

use helpers::*;

use castdesk::api::middleware::error::ApiError;
use castdesk::bootstrap;
use castdesk::config::Config;
use castdesk::models::Session;
use castdesk::services::auth::{
    authenticate, generate_session_token, hash_password, verify_password,
};

#[test]
fn password_hash_round_trip() {
    let hash = hash_password("BookMe123!").unwrap();
    assert_ne!(hash, "BookMe123!");
    assert!(verify_password("BookMe123!", &hash).unwrap());
    assert!(!verify_password("WrongPass1!", &hash).unwrap());
}

#[test]
fn session_tokens_are_64_hex_chars() {
    let token = generate_session_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(token, generate_session_token());
}

#[test]
fn sessions_expire() {
    let live = Session::new("agent-1".to_string(), generate_session_token(), 9);
    assert!(!live.is_expired());

    let stale = Session::new("agent-1".to_string(), generate_session_token(), -1);
    assert!(stale.is_expired());
}

#[tokio::test]
async fn login_opens_a_session_for_valid_credentials() {
    let test_db = setup_test_db().await;
    let db = test_db.db();

    let agent = create_test_agent(db, "carla@agency.test").await;

    let result = authenticate(db, "carla@agency.test", "BookMe123!", 9)
        .await
        .unwrap();
    assert_eq!(result.agent.id, agent.id);

    let session = db
        .get_session_by_token(&result.session.token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.agent_id, agent.id);
    assert!(!session.is_expired());

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn wrong_credentials_are_indistinguishable() {
    let test_db = setup_test_db().await;
    let db = test_db.db();

    create_test_agent(db, "carla@agency.test").await;

    let wrong_password = authenticate(db, "carla@agency.test", "WrongPass1!", 9).await;
    assert!(matches!(wrong_password, Err(ApiError::Unauthorized)));

    let unknown_email = authenticate(db, "nobody@agency.test", "BookMe123!", 9).await;
    assert!(matches!(unknown_email, Err(ApiError::Unauthorized)));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn cleanup_removes_only_expired_sessions() {
    let test_db = setup_test_db().await;
    let db = test_db.db();

    let agent = create_test_agent(db, "carla@agency.test").await;

    let live = Session::new(agent.id.clone(), generate_session_token(), 9);
    let stale = Session::new(agent.id.clone(), generate_session_token(), -1);
    db.create_session(&live).await.unwrap();
    db.create_session(&stale).await.unwrap();

    let removed = db.cleanup_expired_sessions().await.unwrap();
    assert_eq!(removed, 1);

    assert!(db.get_session_by_token(&live.token).await.unwrap().is_some());
    assert!(db.get_session_by_token(&stale.token).await.unwrap().is_none());

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn admin_initialization_is_idempotent() {
    let test_db = setup_test_db().await;
    let db = test_db.db();

    let config = Config {
        database_url: String::new(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        admin_email: "admin@agency.test".to_string(),
        admin_password: "BookMe123!".to_string(),
        session_duration_hours: 9,
        ledger_dir: "ledger".to_string(),
    };

    bootstrap::initialize_admin(db, &config).await.unwrap();
    bootstrap::initialize_admin(db, &config).await.unwrap();

    let admin = db
        .get_agent_by_email("admin@agency.test")
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("BookMe123!", &admin.password_hash).unwrap());

    teardown_test_db(test_db).await;
}
