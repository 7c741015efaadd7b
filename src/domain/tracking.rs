//! Adherence tracking, effect measurements, health goals and biomarkers.
//!
//! Dates in this part of the API are opaque strings exactly as the server
//! emits them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Stopped,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::Active => "active",
            TrackingStatus::Paused => "paused",
            TrackingStatus::Completed => "completed",
            TrackingStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TrackingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TrackingStatus::Active),
            "paused" => Ok(TrackingStatus::Paused),
            "completed" => Ok(TrackingStatus::Completed),
            "stopped" => Ok(TrackingStatus::Stopped),
            other => Err(format!(
                "unknown tracking status '{}', expected active, paused, completed or stopped",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Achieved,
    Missed,
}

impl GoalStatus {
    /// Goals the server still counts as active.
    pub fn is_open(&self) -> bool {
        matches!(self, GoalStatus::NotStarted | GoalStatus::InProgress)
    }
}

/// One user following one intervention over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionTracking {
    pub id: i64,
    pub user_id: i64,
    pub intervention_id: i64,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub status: TrackingStatus,
    /// Percentage, 0 to 100.
    #[serde(default)]
    pub adherence_rate: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The server always starts tracking as `active` with today's date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTracking {
    pub user_id: i64,
    pub intervention_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adherence_rate: Option<f64>,
    /// ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectMeasurement {
    pub id: i64,
    // misspelled on the wire
    #[serde(rename = "intervient_tracking_id")]
    pub tracking_id: i64,
    pub metric_name: String,
    pub metric_value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub baseline_value: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub measurement_date: String,
    pub created_at: String,
}

impl EffectMeasurement {
    /// Change against the recorded baseline, when there is one.
    pub fn change_from_baseline(&self) -> Option<f64> {
        self.baseline_value.map(|baseline| self.metric_value - baseline)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    #[serde(rename = "intervient_tracking_id")]
    pub tracking_id: i64,
    pub metric_name: String,
    pub metric_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub value: f64,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Oldest first, grouped under one metric name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProgress {
    #[serde(default)]
    pub baseline: Option<f64>,
    pub measurements: Vec<ProgressPoint>,
}

impl MetricProgress {
    pub fn latest(&self) -> Option<&ProgressPoint> {
        self.measurements.last()
    }
}

/// Keyed by metric name.
pub type TrackingProgress = HashMap<String, MetricProgress>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthGoal {
    pub id: i64,
    pub user_id: i64,
    pub goal_type: String,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    pub start_date: String,
    pub target_date: String,
    #[serde(default)]
    pub interventions: Option<Vec<i64>>,
    pub status: GoalStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub user_id: i64,
    pub goal_type: String,
    pub target_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// ISO 8601.
    pub start_date: String,
    /// ISO 8601.
    pub target_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interventions: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

/// A lab, home-test or wearable reading. `is_normal` is decided by the
/// server from the reference range; creation responses carry only the
/// id, the flag and the dates, so everything else is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerMeasurement {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub biomarker_name: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_range_low: Option<f64>,
    #[serde(default)]
    pub reference_range_high: Option<f64>,
    #[serde(default)]
    pub is_normal: Option<bool>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub measurement_date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBiomarker {
    pub user_id: i64,
    pub biomarker_name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range_high: Option<f64>,
    /// `lab`, `home_test` or `wearable`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewBiomarker {
    pub fn new(user_id: i64, biomarker_name: impl Into<String>, value: f64) -> Self {
        Self {
            user_id,
            biomarker_name: biomarker_name.into(),
            value,
            unit: None,
            reference_range_low: None,
            reference_range_high: None,
            source: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub value: f64,
    pub date: String,
    #[serde(default)]
    pub is_normal: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerTrend {
    pub biomarker_name: String,
    pub period_days: u32,
    pub measurements: Vec<TrendPoint>,
}

impl BiomarkerTrend {
    pub fn out_of_range(&self) -> impl Iterator<Item = &TrendPoint> {
        self.measurements
            .iter()
            .filter(|point| point.is_normal == Some(false))
    }
}
