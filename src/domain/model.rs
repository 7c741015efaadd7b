use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Intervention category. The backend rejects anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nutrition,
    Exercise,
    Sleep,
    Supplement,
    Medical,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Nutrition,
        Category::Exercise,
        Category::Sleep,
        Category::Supplement,
        Category::Medical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Nutrition => "nutrition",
            Category::Exercise => "exercise",
            Category::Sleep => "sleep",
            Category::Supplement => "supplement",
            Category::Medical => "medical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Ordinal study-quality ranking, 1 = strongest evidence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum EvidenceLevel {
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    #[default]
    Level4 = 4,
}

impl EvidenceLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            EvidenceLevel::Level1 => "systematic reviews and meta-analyses",
            EvidenceLevel::Level2 => "randomized controlled trials",
            EvidenceLevel::Level3 => "observational studies",
            EvidenceLevel::Level4 => "expert opinion",
        }
    }
}

impl TryFrom<u8> for EvidenceLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EvidenceLevel::Level1),
            2 => Ok(EvidenceLevel::Level2),
            3 => Ok(EvidenceLevel::Level3),
            4 => Ok(EvidenceLevel::Level4),
            other => Err(format!("evidence level must be between 1 and 4, got {}", other)),
        }
    }
}

impl From<EvidenceLevel> for u8 {
    fn from(level: EvidenceLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl FromStr for EvidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u8 = s
            .parse()
            .map_err(|_| format!("evidence level must be a number, got '{}'", s))?;
        EvidenceLevel::try_from(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub mechanism: Option<String>,
    #[serde(default)]
    pub evidence_level: EvidenceLevel,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Study design of a piece of evidence. Values the client does not know
/// decode to `Other` instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    RandomizedTrial,
    CohortStudy,
    CaseControl,
    MetaAnalysis,
    Expert,
    #[serde(other)]
    Other,
}

/// Effect-size estimate with its 95% confidence interval.
///
/// The backend stores this as a free-form object, so every known key is
/// optional and anything else is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_interval",
        skip_serializing_if = "Option::is_none"
    )]
    pub ci_95: Option<(f64, f64)>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl EffectSize {
    pub fn new(metric: impl Into<String>, value: f64) -> Self {
        Self {
            metric: Some(metric.into()),
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn with_ci(mut self, low: f64, high: f64) -> Self {
        self.ci_95 = Some((low, high));
        self
    }

    /// `low <= value <= high`. Not enforced when decoding; callers check
    /// data they intend to present as consistent. Rows without both an
    /// estimate and an interval have nothing to contradict.
    pub fn ci_is_consistent(&self) -> bool {
        match (self.value, self.ci_95) {
            (Some(value), Some((low, high))) => low <= value && value <= high,
            _ => true,
        }
    }
}

// Anything that is not a two-number array reads as "no interval".
fn lenient_interval<'de, D>(deserializer: D) -> Result<Option<(f64, f64)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: i64,
    pub intervention_id: i64,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub pubmed_id: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub sample_size: Option<u32>,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub effect_size: Option<EffectSize>,
    #[serde(default)]
    pub outcomes: Option<Vec<String>>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl Evidence {
    pub fn outcomes(&self) -> &[String] {
        self.outcomes.as_deref().unwrap_or_default()
    }
}

const NET_BENEFIT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub user_id: String,
    pub intervention_id: i64,
    pub priority: u8,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub benefit_score: Option<f64>,
    #[serde(default)]
    pub net_benefit: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl Recommendation {
    /// Checks the server's `net_benefit == benefit - risk` contract.
    /// `None` when any of the three scores is missing.
    pub fn net_benefit_consistent(&self) -> Option<bool> {
        let (risk, benefit, net) = (self.risk_score?, self.benefit_score?, self.net_benefit?);
        Some(((benefit - risk) - net).abs() <= NET_BENEFIT_TOLERANCE)
    }
}

/// Dashboard row returned by `top-interventions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionWithScores {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub evidence_level: EvidenceLevel,
    pub risk_score: f64,
    pub benefit_score: f64,
    pub net_benefit: f64,
}

impl InterventionWithScores {
    pub fn net_benefit_consistent(&self) -> bool {
        ((self.benefit_score - self.risk_score) - self.net_benefit).abs() <= NET_BENEFIT_TOLERANCE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub blood_pressure_systolic: Option<u16>,
    #[serde(default)]
    pub blood_pressure_diastolic: Option<u16>,
    #[serde(default)]
    pub heart_rate: Option<u16>,
    #[serde(default)]
    pub medical_conditions: Option<Vec<String>>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub current_medications: Option<Vec<String>>,
    #[serde(default)]
    pub family_history: Option<HashMap<String, serde_json::Value>>,
    pub created_at: String,
    pub updated_at: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// Plain acknowledgement body, e.g. from logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
