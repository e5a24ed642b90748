use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use userdir::api::{CreateUserRequest, HttpUserApi, UpdateUserRequest, User};
use userdir::core::{UserDirectory, UserState, UserStore};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn john_doe() -> User {
    User {
        id: "1".to_string(),
        name: "John Doe".to_string(),
        zip_code: "12345".to_string(),
        latitude: 40.7128,
        longitude: -74.006,
        timezone: "America/New_York".to_string(),
        created_at: "2023-01-01T00:00:00Z".to_string(),
        updated_at: "2023-01-01T00:00:00Z".to_string(),
    }
}

fn ok(data: impl serde::Serialize) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "ok",
        "data": data
    }))
}

fn directory_for(server: &MockServer, initial: UserState) -> UserDirectory {
    let api = HttpUserApi::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap();
    UserDirectory::new(UserStore::with_state(initial), Arc::new(api))
}

fn create_request() -> CreateUserRequest {
    CreateUserRequest {
        name: "John Doe".to_string(),
        zip_code: "12345".to_string(),
    }
}

// ============================================================================
// Round Trips
// ============================================================================

#[tokio::test]
async fn test_create_round_trip_adds_server_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ok(john_doe()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let directory = directory_for(&mock_server, UserState::new());
    let user = directory.create_user(create_request()).await.unwrap();

    assert_eq!(user, john_doe());
    let state = directory.state();
    assert_eq!(state.users, vec![john_doe()]);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_fetch_then_update_then_delete() {
    let mock_server = MockServer::start().await;

    let updated = User {
        zip_code: "90210".to_string(),
        updated_at: "2023-02-01T00:00:00Z".to_string(),
        ..john_doe()
    };

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ok(vec![john_doe()]))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/1"))
        .respond_with(ok(updated.clone()))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&mock_server)
        .await;

    let directory = directory_for(&mock_server, UserState::new());

    directory.fetch_users().await;
    assert_eq!(directory.users(), vec![john_doe()]);

    directory.select_user(Some(john_doe()));
    let request = UpdateUserRequest {
        name: None,
        zip_code: Some("90210".to_string()),
    };
    directory.update_user("1", request).await.unwrap();
    assert_eq!(directory.users(), vec![updated.clone()]);
    assert_eq!(directory.selected_user(), Some(updated));

    directory.delete_user("1").await.unwrap();
    assert!(directory.users().is_empty());
    assert_eq!(directory.selected_user(), None);
    assert!(!directory.loading());
}

// ============================================================================
// Error Surfacing
// ============================================================================

#[tokio::test]
async fn test_rejected_create_surfaces_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "success": false, "message": "Invalid data" })),
        )
        .mount(&mock_server)
        .await;

    let directory = directory_for(&mock_server, UserState::new());
    let err = directory.create_user(create_request()).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid data");
    assert_eq!(directory.error(), Some("Invalid data".to_string()));
    assert!(!directory.loading());
    assert!(directory.users().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_keeps_existing_users() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let initial = UserState {
        users: vec![john_doe()],
        ..UserState::new()
    };
    let directory = directory_for(&mock_server, initial);

    // Does not return an error
    directory.fetch_users().await;

    assert_eq!(directory.users(), vec![john_doe()]);
    assert_eq!(
        directory.error(),
        Some("Request failed with status code 503".to_string())
    );
    assert!(!directory.loading());
}

#[tokio::test]
async fn test_success_clears_previous_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ok(john_doe()))
        .mount(&mock_server)
        .await;

    let initial = UserState {
        error: Some("Network Error".to_string()),
        ..UserState::new()
    };
    let directory = directory_for(&mock_server, initial);
    directory.create_user(create_request()).await.unwrap();

    assert_eq!(directory.error(), None);
}

#[tokio::test]
async fn test_subscribers_see_loading_then_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ok(vec![john_doe()]).set_delay(Duration::from_millis(200)))
        .mount(&mock_server)
        .await;

    let directory = directory_for(&mock_server, UserState::new());
    let mut rx = directory.subscribe();

    let task = {
        let directory = directory.clone();
        tokio::spawn(async move { directory.fetch_users().await })
    };

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().loading);

    task.await.unwrap();
    let state = rx.borrow().clone();
    assert!(!state.loading);
    assert_eq!(state.users.len(), 1);
}

#[tokio::test]
async fn test_unreachable_server_lands_in_error() {
    let api = HttpUserApi::new("http://127.0.0.1:1/api", Duration::from_millis(2000)).unwrap();
    let directory = UserDirectory::new(UserStore::new(), Arc::new(api));

    directory.fetch_users().await;

    let error = directory.error().unwrap_or_default();
    assert!(!error.is_empty());
    assert!(!directory.loading());
    assert!(directory.users().is_empty());
}
