use crate::core::http::{ApiClient, RequestOptions};
use crate::domain::model::Category;
use crate::domain::personalized::{
    ExplainReply, InterventionComparison, PersonalizedRecommendations, RecommendationExplanation,
};
use crate::domain::session::Session;
use crate::utils::error::Result;

pub const PERSONALIZED_BASE: &str = "/enhanced-recommendations";
pub const DEFAULT_PERSONALIZED_LIMIT: u32 = 10;

/// Per-user scored recommendations. Like the top-interventions listing,
/// `limit` is always sent.
#[derive(Debug, Clone, Copy)]
pub struct PersonalizedApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PersonalizedApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn for_user(
        &self,
        user_id: i64,
        limit: Option<u32>,
        exclude: &[Category],
    ) -> Result<PersonalizedRecommendations> {
        let path = format!("{}/personalized/{}", PERSONALIZED_BASE, user_id);
        let mut options =
            RequestOptions::new().query("limit", limit.unwrap_or(DEFAULT_PERSONALIZED_LIMIT));
        if !exclude.is_empty() {
            let categories: Vec<&str> = exclude.iter().map(|category| category.as_str()).collect();
            options = options.query("exclude_categories", categories.join(","));
        }
        Ok(self.client.get(&path, options).await?.data)
    }

    /// `None` when the server does not know the intervention.
    pub async fn explain(
        &self,
        user_id: i64,
        intervention_id: i64,
    ) -> Result<Option<RecommendationExplanation>> {
        let path = format!(
            "{}/explain/{}/{}",
            PERSONALIZED_BASE, user_id, intervention_id
        );
        let reply: ExplainReply = self.client.get(&path, RequestOptions::new()).await?.data;
        Ok(match reply {
            ExplainReply::Explained(explanation) => Some(*explanation),
            ExplainReply::Missing { error } => {
                tracing::debug!("No explanation for intervention {}: {}", intervention_id, error);
                None
            }
        })
    }

    pub async fn compare(&self, user_id: i64, intervention_ids: &[i64]) -> Result<InterventionComparison> {
        let path = format!("{}/compare/{}", PERSONALIZED_BASE, user_id);
        let ids: Vec<String> = intervention_ids.iter().map(i64::to_string).collect();
        let options = RequestOptions::new().query("intervention_ids", ids.join(","));
        Ok(self.client.get(&path, options).await?.data)
    }

    /// Recommendations for whoever owns the session.
    pub async fn mine(&self, session: &Session, limit: Option<u32>) -> Result<PersonalizedRecommendations> {
        let path = format!("{}/my-recommendations", PERSONALIZED_BASE);
        let options = RequestOptions::new()
            .session(session)
            .query("limit", limit.unwrap_or(DEFAULT_PERSONALIZED_LIMIT));
        Ok(self.client.get(&path, options).await?.data)
    }
}

impl ApiClient {
    pub fn personalized(&self) -> PersonalizedApi<'_> {
        PersonalizedApi::new(self)
    }
}
