use crate::core::http::{ApiClient, RequestOptions};
use crate::domain::model::Evidence;
use crate::domain::requests::{NewEvidence, Page};
use crate::utils::error::Result;

/// `/evidence` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EvidenceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_by_intervention(&self, intervention_id: i64, page: Page) -> Result<Vec<Evidence>> {
        let path = format!("/evidence/intervention/{}", intervention_id);
        let options = RequestOptions::new().query_pairs(page.to_query());
        Ok(self.client.get(&path, options).await?.data)
    }

    pub async fn get(&self, id: i64) -> Result<Evidence> {
        let path = format!("/evidence/{}", id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn create(&self, evidence: &NewEvidence) -> Result<Evidence> {
        tracing::debug!(
            "Creating evidence for intervention {}",
            evidence.intervention_id
        );
        let options = RequestOptions::new().json(evidence)?;
        Ok(self.client.post("/evidence", options).await?.data)
    }

    /// Evidence with `quality_score >= min_quality`, best first.
    pub async fn by_quality(&self, min_quality: f64) -> Result<Vec<Evidence>> {
        let options = RequestOptions::new().query("min_quality", min_quality);
        Ok(self.client.get("/evidence/by-quality", options).await?.data)
    }

    pub async fn meta_analyses(&self) -> Result<Vec<Evidence>> {
        Ok(self
            .client
            .get("/evidence/meta-analyses", RequestOptions::new())
            .await?
            .data)
    }

    pub async fn randomized_trials(&self) -> Result<Vec<Evidence>> {
        Ok(self
            .client
            .get("/evidence/randomized-trials", RequestOptions::new())
            .await?
            .data)
    }
}

impl ApiClient {
    pub fn evidence(&self) -> EvidenceApi<'_> {
        EvidenceApi::new(self)
    }
}
