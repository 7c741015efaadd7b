//! Per-user scoring served by the personalized recommendation endpoints.
//!
//! The server computes every score here; these types only carry them.

use crate::domain::model::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One intervention scored for one user. `score` is normalised to
/// `[-1, 1]` and `components` holds the weighted parts it was built from
/// (`evidence_quality`, `health_match`, `risk_benefit`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredIntervention {
    pub intervention_id: i64,
    pub name: String,
    pub category: Category,
    pub score: f64,
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Highest score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedRecommendations {
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub recommendations: Vec<ScoredIntervention>,
    #[serde(default)]
    pub total: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub total: u32,
    /// Keyed by evidence level, "1" to "4".
    #[serde(default)]
    pub by_level: BTreeMap<String, u32>,
    pub avg_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInteraction {
    pub drug_a: String,
    pub drug_b: String,
    pub severity: String,
    #[serde(default)]
    pub mechanism: Option<String>,
    #[serde(default)]
    pub effect_code: Option<String>,
    #[serde(default)]
    pub management: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSummary {
    pub total: u32,
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub moderate: u32,
    #[serde(default)]
    pub mild: u32,
    #[serde(default)]
    pub highest_severity: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInteractions {
    pub count: u32,
    #[serde(default)]
    pub details: Vec<DrugInteraction>,
    pub summary: InteractionSummary,
}

/// Why one intervention scored the way it did for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationExplanation {
    /// Intervention name.
    pub intervention: String,
    pub total_score: f64,
    #[serde(default)]
    pub score_breakdown: BTreeMap<String, f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
    pub evidence_summary: EvidenceSummary,
    pub drug_interactions: DrugInteractions,
}

/// The explain endpoint answers 200 with `{"error": ...}` for an unknown
/// intervention instead of a 404.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExplainReply {
    Explained(Box<RecommendationExplanation>),
    Missing { error: String },
}

/// Unknown interventions are dropped by the server, so `comparisons` can
/// be shorter than the list that was asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionComparison {
    pub user_id: i64,
    pub comparisons: Vec<RecommendationExplanation>,
    pub total: usize,
}
