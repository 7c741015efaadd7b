use crate::core::http::{ApiClient, RequestOptions};
use crate::domain::requests::Page;
use crate::domain::tracking::{
    BiomarkerMeasurement, BiomarkerTrend, EffectMeasurement, GoalUpdate, HealthGoal,
    InterventionTracking, NewBiomarker, NewGoal, NewMeasurement, NewTracking, TrackingProgress,
    TrackingStatus, TrackingUpdate,
};
use crate::utils::error::Result;

/// Adherence tracking, effect measurements, goals and biomarkers. These
/// routes sit directly under the API prefix.
#[derive(Debug, Clone, Copy)]
pub struct TrackingApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TrackingApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn start(&self, tracking: &NewTracking) -> Result<InterventionTracking> {
        tracing::debug!(
            "Starting tracking of intervention {} for user {}",
            tracking.intervention_id,
            tracking.user_id
        );
        let options = RequestOptions::new().json(tracking)?;
        Ok(self.client.post("/tracking/start", options).await?.data)
    }

    pub async fn get(&self, tracking_id: i64) -> Result<InterventionTracking> {
        let path = format!("/tracking/{}", tracking_id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn update(&self, tracking_id: i64, update: &TrackingUpdate) -> Result<InterventionTracking> {
        let path = format!("/tracking/{}", tracking_id);
        let options = RequestOptions::new().json(update)?;
        Ok(self.client.put(&path, options).await?.data)
    }

    /// Most recently started first.
    pub async fn list_by_user(
        &self,
        user_id: i64,
        page: Page,
        status: Option<TrackingStatus>,
    ) -> Result<Vec<InterventionTracking>> {
        let path = format!("/tracking/user/{}", user_id);
        let mut options = RequestOptions::new().query_pairs(page.to_query());
        if let Some(status) = status {
            options = options.query("status", status.as_str());
        }
        Ok(self.client.get(&path, options).await?.data)
    }

    /// Newest first.
    pub async fn measurements(&self, tracking_id: i64) -> Result<Vec<EffectMeasurement>> {
        let path = format!("/tracking/{}/measurements", tracking_id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn record_measurement(&self, measurement: &NewMeasurement) -> Result<EffectMeasurement> {
        tracing::debug!(
            "Recording {} for tracking {}",
            measurement.metric_name,
            measurement.tracking_id
        );
        let options = RequestOptions::new().json(measurement)?;
        Ok(self.client.post("/measurements", options).await?.data)
    }

    pub async fn measurements_by_user(
        &self,
        user_id: i64,
        page: Page,
        metric_name: Option<&str>,
    ) -> Result<Vec<EffectMeasurement>> {
        let path = format!("/measurements/user/{}", user_id);
        let mut options = RequestOptions::new().query_pairs(page.to_query());
        if let Some(metric_name) = metric_name {
            options = options.query("metric_name", metric_name);
        }
        Ok(self.client.get(&path, options).await?.data)
    }

    /// Measurements of one tracking grouped by metric, each with its baseline.
    pub async fn progress(&self, tracking_id: i64) -> Result<TrackingProgress> {
        let path = format!("/measurements/{}/progress", tracking_id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<HealthGoal> {
        tracing::debug!("Creating {} goal for user {}", goal.goal_type, goal.user_id);
        let options = RequestOptions::new().json(goal)?;
        Ok(self.client.post("/goals", options).await?.data)
    }

    pub async fn goals_by_user(&self, user_id: i64) -> Result<Vec<HealthGoal>> {
        let path = format!("/goals/user/{}", user_id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn update_goal(&self, goal_id: i64, update: &GoalUpdate) -> Result<HealthGoal> {
        let path = format!("/goals/{}", goal_id);
        let options = RequestOptions::new().json(update)?;
        Ok(self.client.put(&path, options).await?.data)
    }

    /// Not started or in progress, nearest target date first.
    pub async fn active_goals(&self, user_id: i64) -> Result<Vec<HealthGoal>> {
        let path = format!("/goals/active/user/{}", user_id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn record_biomarker(&self, biomarker: &NewBiomarker) -> Result<BiomarkerMeasurement> {
        tracing::debug!(
            "Recording biomarker {} for user {}",
            biomarker.biomarker_name,
            biomarker.user_id
        );
        let options = RequestOptions::new().json(biomarker)?;
        Ok(self.client.post("/biomarkers", options).await?.data)
    }

    pub async fn biomarkers_by_user(
        &self,
        user_id: i64,
        page: Page,
        biomarker_name: Option<&str>,
    ) -> Result<Vec<BiomarkerMeasurement>> {
        let path = format!("/biomarkers/user/{}", user_id);
        let mut options = RequestOptions::new().query_pairs(page.to_query());
        if let Some(biomarker_name) = biomarker_name {
            options = options.query("biomarker_name", biomarker_name);
        }
        Ok(self.client.get(&path, options).await?.data)
    }

    /// Readings of one biomarker over the last `days` (server default 30).
    pub async fn biomarker_trend(
        &self,
        user_id: i64,
        biomarker_name: &str,
        days: Option<u32>,
    ) -> Result<BiomarkerTrend> {
        let path = format!("/biomarkers/trends/{}", user_id);
        let mut options = RequestOptions::new().query("biomarker_name", biomarker_name);
        if let Some(days) = days {
            options = options.query("days", days);
        }
        Ok(self.client.get(&path, options).await?.data)
    }
}

impl ApiClient {
    pub fn tracking(&self) -> TrackingApi<'_> {
        TrackingApi::new(self)
    }
}
