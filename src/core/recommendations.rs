use crate::core::http::{path_segment, ApiClient, RequestOptions};
use crate::domain::model::{InterventionWithScores, Recommendation};
use crate::domain::requests::{NewRecommendation, Page};
use crate::utils::error::Result;

pub const DEFAULT_TOP_LIMIT: u32 = 10;

/// `/recommendations` endpoints. Scores come back exactly as the server
/// computed them.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecommendationsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, recommendation: &NewRecommendation) -> Result<Recommendation> {
        tracing::debug!(
            "Creating recommendation of intervention {} for user {}",
            recommendation.intervention_id,
            recommendation.user_id
        );
        let options = RequestOptions::new().json(recommendation)?;
        Ok(self.client.post("/recommendations", options).await?.data)
    }

    /// Ordered by net benefit, highest first (server-side).
    pub async fn list_by_user(&self, user_id: &str, page: Page) -> Result<Vec<Recommendation>> {
        let path = format!("/recommendations/user/{}", path_segment(user_id)?);
        let options = RequestOptions::new().query_pairs(page.to_query());
        Ok(self.client.get(&path, options).await?.data)
    }

    pub async fn get(&self, id: i64) -> Result<Recommendation> {
        let path = format!("/recommendations/{}", id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    /// Top interventions ranked by net benefit. `limit` is always sent,
    /// defaulting to [`DEFAULT_TOP_LIMIT`].
    pub async fn top_interventions(&self, limit: Option<u32>) -> Result<Vec<InterventionWithScores>> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        let options = RequestOptions::new().query("limit", limit);
        Ok(self
            .client
            .get("/recommendations/top-interventions", options)
            .await?
            .data)
    }
}

impl ApiClient {
    pub fn recommendations(&self) -> RecommendationsApi<'_> {
        RecommendationsApi::new(self)
    }
}
