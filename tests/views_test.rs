mod common;

use common::{client_for, evidence_json, intervention_json, profile_json, scored_json, user_json};
use httpmock::prelude::*;
use longevity_client::app::{
    DashboardView, HealthProfileView, InterventionDetailView, InterventionListView, LoginForm,
    RegisterForm, ViewState,
};
use longevity_client::domain::ports::TokenStore;
use longevity_client::domain::{
    Category, Credentials, HealthProfileInput, InterventionFilter, NewUser, TokenPair,
};
use longevity_client::{FileTokenStore, LocalStorage, MemoryTokenStore, Session};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_login_401_shows_error_and_persists_nothing() {
    let server = MockServer::start_async().await;
    let login_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/login");
            then.status(401)
                .json_body(json!({"detail": "Incorrect username or password"}));
        })
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut form = LoginForm::new(client_for(&server), store.clone());

    let logged_in = form.submit(&Credentials::new("ada", "wrong")).await;

    login_mock.assert_async().await;
    assert!(!logged_in);
    assert!(!form.is_submitting());
    assert_eq!(form.error(), Some("Incorrect username or password"));
    assert!(form.session().is_none());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_without_detail_uses_fallback_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/login");
            then.status(500).body("Internal Server Error");
        })
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut form = LoginForm::new(client_for(&server), store.clone());

    assert!(!form.submit(&Credentials::new("ada", "pw")).await);
    assert_eq!(form.error(), Some("Login failed. Please try again."));
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_success_persists_session_to_file() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/login");
            then.status(200).json_body(common::token_json("access-9", "refresh-9"));
        })
        .await;

    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileTokenStore::new(
        LocalStorage::new(temp_dir.path()),
        "session.json",
    ));
    let mut form = LoginForm::new(client_for(&server), store.clone());

    assert!(form.submit(&Credentials::new("ada", "correct-horse")).await);
    assert!(form.error().is_none());

    let persisted = store.load().await.unwrap().unwrap();
    assert_eq!(persisted.access_token(), "access-9");
    assert!(temp_dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_detail_view_renders_both_sections() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions/7");
            then.status(200)
                .json_body(intervention_json(7, "Metformin", "medical", 2));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/evidence/intervention/7");
            then.status(200).json_body(json!([
                evidence_json(1, 7, "randomized_trial", 82.0),
                evidence_json(2, 7, "cohort_study", 64.0)
            ]));
        })
        .await;

    let mut view = InterventionDetailView::new(client_for(&server));
    view.load(7).await;

    assert!(!view.is_loading());
    let detail = view.state().ready().expect("detail should be ready");
    assert_eq!(detail.intervention.name, "Metformin");
    assert_eq!(detail.evidence.len(), 2);
}

#[tokio::test]
async fn test_detail_view_renders_free_form_effect_sizes() {
    let server = MockServer::start_async().await;
    let mut partial = evidence_json(2, 7, "cohort_study", 64.0);
    partial["effect_size"] = json!({"metric": "relative_risk", "ci_95": [0.7, 0.9]});
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions/7");
            then.status(200)
                .json_body(intervention_json(7, "Metformin", "medical", 2));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/evidence/intervention/7");
            then.status(200).json_body(json!([partial]));
        })
        .await;

    let mut view = InterventionDetailView::new(client_for(&server));
    view.load(7).await;

    let detail = view.state().ready().expect("detail should be ready");
    assert_eq!(detail.evidence.len(), 1);
    assert_eq!(detail.evidence[0].effect_size.as_ref().and_then(|e| e.value), None);
}

#[tokio::test]
async fn test_detail_view_renders_neither_when_evidence_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions/7");
            then.status(200)
                .json_body(intervention_json(7, "Metformin", "medical", 2));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/evidence/intervention/7");
            then.status(500)
                .json_body(json!({"detail": "database unavailable"}));
        })
        .await;

    let mut view = InterventionDetailView::new(client_for(&server));
    view.load(7).await;

    assert!(view.state().ready().is_none());
    assert_eq!(
        view.state().error(),
        Some("Failed to load intervention details")
    );
}

#[tokio::test]
async fn test_detail_view_renders_neither_when_intervention_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions/7");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/evidence/intervention/7");
            then.status(200)
                .json_body(json!([evidence_json(1, 7, "randomized_trial", 82.0)]));
        })
        .await;

    let mut view = InterventionDetailView::new(client_for(&server));
    view.load(7).await;

    assert!(matches!(view.state(), ViewState::Failed(_)));
}

#[tokio::test]
async fn test_detail_view_missing_intervention_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions/99");
            then.status(404)
                .json_body(json!({"detail": "Intervention not found"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/evidence/intervention/99");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut view = InterventionDetailView::new(client_for(&server));
    view.load(99).await;

    assert!(view.state().is_not_found());
}

#[tokio::test]
async fn test_unmounted_view_ignores_late_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!([intervention_json(1, "Metformin", "medical", 2)]));
        })
        .await;

    let mut view = InterventionListView::new(client_for(&server));
    let scope = view.scope().clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        scope.unmount();
    });

    view.load().await;

    assert_eq!(view.state(), &ViewState::Empty);
    assert!(view.items().is_empty());
}

#[tokio::test]
async fn test_list_view_failure_falls_back_to_empty_rows() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/interventions")
                .query_param("category", "sleep");
            then.status(503);
        })
        .await;

    let mut view = InterventionListView::new(client_for(&server))
        .with_filter(InterventionFilter::new().category(Category::Sleep));
    view.load().await;

    assert!(!view.is_loading());
    assert!(view.items().is_empty());
    assert_eq!(view.state().error(), Some("Failed to load interventions"));

    // 可重新觸發
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/interventions/search/by-name");
            then.status(200)
                .json_body(json!([intervention_json(3, "Sleep hygiene", "sleep", 3)]));
        })
        .await;
    view.search("Sleep").await;
    assert_eq!(view.items().len(), 1);
}

#[tokio::test]
async fn test_dashboard_view_loads_ranked_rows() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/recommendations/top-interventions")
                .query_param("limit", "3");
            then.status(200).json_body(json!([
                scored_json(1, "Zone 2 cardio", 85.0, 5.0),
                scored_json(4, "Resistance training", 75.0, 8.0),
                scored_json(2, "Sleep regularity", 60.0, 2.0)
            ]));
        })
        .await;

    let mut view = DashboardView::new(client_for(&server)).with_limit(3);
    view.load().await;

    api_mock.assert_async().await;
    let names: Vec<&str> = view.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Zone 2 cardio", "Resistance training", "Sleep regularity"]);
}

#[tokio::test]
async fn test_register_form_shows_duplicate_username() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/register");
            then.status(400)
                .json_body(json!({"detail": "Username already registered"}));
        })
        .await;

    let mut form = RegisterForm::new(client_for(&server));
    let ok = form
        .submit(&NewUser {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "correct-horse".to_string(),
            full_name: None,
        })
        .await;

    assert!(!ok);
    assert_eq!(form.state().error(), Some("Username already registered"));
}

#[tokio::test]
async fn test_register_form_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/register");
            then.status(201).json_body(user_json(5, "grace"));
        })
        .await;

    let mut form = RegisterForm::new(client_for(&server));
    let ok = form
        .submit(&NewUser {
            username: "grace".to_string(),
            email: "grace@example.com".to_string(),
            password: "correct-horse".to_string(),
            full_name: Some("Grace Hopper".to_string()),
        })
        .await;

    assert!(ok);
    assert_eq!(form.state().ready().map(|u| u.id), Some(5));
}

#[tokio::test]
async fn test_health_profile_view_creates_when_missing() {
    let server = MockServer::start_async().await;
    let get_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/auth/health-profile");
            then.status(404)
                .json_body(json!({"detail": "Health profile not found"}));
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/auth/health-profile")
                .header("Authorization", "Bearer access-1");
            then.status(201).json_body(profile_json(1, 45));
        })
        .await;

    let session = Session::new(TokenPair {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        token_type: "bearer".to_string(),
    });
    let mut view = HealthProfileView::new(client_for(&server), session);

    view.load().await;
    assert!(view.state().is_not_found());

    view.save(&HealthProfileInput {
        age: Some(45),
        ..Default::default()
    })
    .await;

    get_mock.assert_async().await;
    create_mock.assert_async().await;
    assert_eq!(view.state().ready().and_then(|p| p.age), Some(45));
}

#[tokio::test]
async fn test_health_profile_view_updates_loaded_profile() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/auth/health-profile");
            then.status(200).json_body(profile_json(1, 45));
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/health-profile");
            then.status(201).json_body(profile_json(1, 46));
        })
        .await;
    let update_mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/auth/health-profile")
                .header("Authorization", "Bearer access-1")
                .json_body(json!({"age": 46}));
            then.status(200).json_body(profile_json(1, 46));
        })
        .await;

    let session = Session::new(TokenPair {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        token_type: "bearer".to_string(),
    });
    let mut view = HealthProfileView::new(client_for(&server), session);

    view.load().await;
    assert_eq!(view.state().ready().and_then(|p| p.age), Some(45));

    view.save(&HealthProfileInput {
        age: Some(46),
        ..Default::default()
    })
    .await;

    update_mock.assert_async().await;
    create_mock.assert_hits_async(0).await;
    assert!(!view.is_loading());
    assert_eq!(view.state().ready().and_then(|p| p.age), Some(46));
}

#[tokio::test]
async fn test_health_profile_view_updates_after_failed_load() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/auth/health-profile");
            then.status(500);
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/health-profile");
            then.status(201).json_body(profile_json(1, 52));
        })
        .await;
    let update_mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/v1/auth/health-profile");
            then.status(200).json_body(profile_json(1, 52));
        })
        .await;

    let session = Session::new(TokenPair {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        token_type: "bearer".to_string(),
    });
    let mut view = HealthProfileView::new(client_for(&server), session);

    view.load().await;
    assert_eq!(view.state().error(), Some("Failed to load health profile"));

    view.save(&HealthProfileInput {
        age: Some(52),
        ..Default::default()
    })
    .await;

    update_mock.assert_async().await;
    create_mock.assert_hits_async(0).await;
    assert_eq!(view.state().ready().and_then(|p| p.age), Some(52));
}
