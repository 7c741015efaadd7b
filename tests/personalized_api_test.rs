mod common;

use anyhow::Result;
use common::{client_for, has_query_param};
use httpmock::prelude::*;
use longevity_client::domain::{Category, TokenPair};
use longevity_client::Session;
use serde_json::{json, Value};

fn scored_row(id: i64, name: &str, category: &str, score: f64) -> Value {
    json!({
        "intervention_id": id,
        "name": name,
        "category": category,
        "score": score,
        "components": {
            "evidence_quality": 0.9,
            "health_match": 0.6,
            "risk_benefit": 0.7,
            "drug_interaction": 0.0,
            "age_appropriateness": 0.8
        },
        "reasoning": "High-quality evidence"
    })
}

fn explanation(name: &str, score: f64) -> Value {
    json!({
        "intervention": name,
        "total_score": score,
        "score_breakdown": {"evidence_quality": 0.9},
        "reasoning": "High-quality evidence",
        "evidence_summary": {"total": 2, "by_level": {"1": 2, "2": 0, "3": 0, "4": 0}, "avg_quality": 88.0},
        "drug_interactions": {
            "count": 0,
            "details": [],
            "summary": {
                "total": 0, "high": 0, "moderate": 0, "mild": 0,
                "highest_severity": null,
                "recommendation": "No interactions detected"
            }
        }
    })
}

#[tokio::test]
async fn test_personalized_sends_limit_and_excluded_categories() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/enhanced-recommendations/personalized/4")
                .query_param("limit", "10")
                .query_param("exclude_categories", "supplement,medical");
            then.status(200).json_body(json!({
                "user_id": 4,
                "recommendations": [
                    scored_row(2, "Zone 2 cardio", "exercise", 0.62),
                    scored_row(6, "Mediterranean diet", "nutrition", 0.55)
                ],
                "total": 2
            }));
        })
        .await;

    let client = client_for(&server);
    let result = client
        .personalized()
        .for_user(4, None, &[Category::Supplement, Category::Medical])
        .await?;

    api_mock.assert_async().await;
    assert_eq!(result.total, Some(2));
    assert_eq!(result.recommendations[0].name, "Zone 2 cardio");
    assert_eq!(result.recommendations[0].components["health_match"], 0.6);
    Ok(())
}

#[tokio::test]
async fn test_personalized_without_exclusions_omits_parameter() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/enhanced-recommendations/personalized/4")
                .query_param("limit", "3")
                .matches(|req| !has_query_param(req, "exclude_categories"));
            then.status(200)
                .json_body(json!({"user_id": 4, "recommendations": [], "total": 0}));
        })
        .await;

    let client = client_for(&server);
    let result = client.personalized().for_user(4, Some(3), &[]).await?;

    api_mock.assert_async().await;
    assert!(result.recommendations.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_explain_unknown_intervention_is_none() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/enhanced-recommendations/explain/4/2");
            then.status(200).json_body(explanation("Zone 2 cardio", 0.62));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/enhanced-recommendations/explain/4/999");
            then.status(200)
                .json_body(json!({"error": "Intervention not found"}));
        })
        .await;

    let client = client_for(&server);
    let personalized = client.personalized();

    let known = personalized.explain(4, 2).await?.expect("explanation");
    assert_eq!(known.intervention, "Zone 2 cardio");
    assert_eq!(known.drug_interactions.summary.highest_severity, None);

    assert!(personalized.explain(4, 999).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_compare_joins_ids() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/enhanced-recommendations/compare/4")
                .query_param("intervention_ids", "2,6,999");
            then.status(200).json_body(json!({
                "user_id": 4,
                "comparisons": [explanation("Zone 2 cardio", 0.62), explanation("Mediterranean diet", 0.55)],
                "total": 2
            }));
        })
        .await;

    let client = client_for(&server);
    let comparison = client.personalized().compare(4, &[2, 6, 999]).await?;

    api_mock.assert_async().await;
    assert_eq!(comparison.total, 2);
    assert_eq!(comparison.comparisons.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_my_recommendations_uses_session_token() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/enhanced-recommendations/my-recommendations")
                .header("Authorization", "Bearer access-ada")
                .query_param("limit", "10");
            then.status(200).json_body(json!({
                "user_id": 1,
                "username": "ada",
                "recommendations": [scored_row(2, "Zone 2 cardio", "exercise", 0.62)]
            }));
        })
        .await;

    let client = client_for(&server);
    let session = Session::new(TokenPair {
        access_token: "access-ada".to_string(),
        refresh_token: "refresh-ada".to_string(),
        token_type: "bearer".to_string(),
    });
    let mine = client.personalized().mine(&session, None).await?;

    api_mock.assert_async().await;
    assert_eq!(mine.username.as_deref(), Some("ada"));
    assert_eq!(mine.recommendations.len(), 1);
    Ok(())
}
