#![allow(dead_code)]

use httpmock::prelude::HttpMockRequest;
use longevity_client::ApiClient;
use serde_json::{json, Value};

/// True when the request carried `name` in its query string.
pub fn has_query_param(req: &HttpMockRequest, name: &str) -> bool {
    req.query_params
        .as_ref()
        .is_some_and(|params| params.iter().any(|(key, _)| key == name))
}

pub fn client_for(server: &httpmock::MockServer) -> ApiClient {
    ApiClient::new(&server.base_url()).unwrap()
}

pub fn intervention_json(id: i64, name: &str, category: &str, level: u8) -> Value {
    json!({
        "id": id,
        "name": name,
        "name_en": null,
        "description": format!("{} description", name),
        "category": category,
        "mechanism": "AMPK activation",
        "evidence_level": level,
        "created_at": "2024-05-01T10:00:00.000001",
        "updated_at": "2024-05-01T10:00:00.000001"
    })
}

pub fn evidence_json(id: i64, intervention_id: i64, source_type: &str, quality: f64) -> Value {
    json!({
        "id": id,
        "intervention_id": intervention_id,
        "source_type": source_type,
        "pubmed_id": format!("PMID{}", 30000000 + id),
        "citation": format!("Study {} et al. 2021", id),
        "sample_size": 1200,
        "duration_days": 365,
        "effect_size": {"metric": "hazard_ratio", "value": 0.85, "ci_95": [0.78, 0.92]},
        "outcomes": ["all-cause mortality", "cardiovascular events"],
        "quality_score": quality,
        "created_at": "2024-05-02T08:30:00"
    })
}

pub fn scored_json(id: i64, name: &str, benefit: f64, risk: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "exercise",
        "evidence_level": 1,
        "risk_score": risk,
        "benefit_score": benefit,
        "net_benefit": benefit - risk
    })
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "full_name": null,
        "is_active": true,
        "is_admin": false,
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-01T10:00:00"
    })
}

pub fn token_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer"
    })
}

pub fn profile_json(user_id: i64, age: u8) -> Value {
    json!({
        "id": 1,
        "user_id": user_id,
        "age": age,
        "gender": "female",
        "weight": 62.5,
        "height": 168.0,
        "blood_pressure_systolic": 118,
        "blood_pressure_diastolic": 76,
        "heart_rate": 58,
        "medical_conditions": [],
        "allergies": ["penicillin"],
        "current_medications": null,
        "family_history": {"mother": ["type 2 diabetes"], "centenarians": 1},
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-03T12:00:00"
    })
}
