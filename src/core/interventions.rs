use crate::core::http::{ApiClient, RequestOptions};
use crate::domain::model::{EvidenceLevel, Intervention};
use crate::domain::requests::{InterventionFilter, InterventionUpdate, NewIntervention};
use crate::utils::error::Result;

/// `/interventions` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct InterventionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> InterventionsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: InterventionFilter) -> Result<Vec<Intervention>> {
        tracing::debug!("Listing interventions with {:?}", filter);
        let options = RequestOptions::new().query_pairs(filter.to_query());
        Ok(self.client.get("/interventions", options).await?.data)
    }

    pub async fn get(&self, id: i64) -> Result<Intervention> {
        let path = format!("/interventions/{}", id);
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }

    pub async fn create(&self, intervention: &NewIntervention) -> Result<Intervention> {
        tracing::debug!("Creating intervention '{}'", intervention.name);
        let options = RequestOptions::new().json(intervention)?;
        Ok(self.client.post("/interventions", options).await?.data)
    }

    pub async fn update(&self, id: i64, update: &InterventionUpdate) -> Result<Intervention> {
        let path = format!("/interventions/{}", id);
        let options = RequestOptions::new().json(update)?;
        Ok(self.client.put(&path, options).await?.data)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::debug!("Deleting intervention {}", id);
        let path = format!("/interventions/{}", id);
        self.client
            .delete::<()>(&path, RequestOptions::new())
            .await?;
        Ok(())
    }

    /// Substring match on the name; the server caps results at 20.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Intervention>> {
        let options = RequestOptions::new().query("query", query);
        Ok(self
            .client
            .get("/interventions/search/by-name", options)
            .await?
            .data)
    }

    pub async fn by_evidence_level(&self, level: EvidenceLevel) -> Result<Vec<Intervention>> {
        let path = format!("/interventions/by-evidence-level/{}", level.as_u8());
        Ok(self.client.get(&path, RequestOptions::new()).await?.data)
    }
}

impl ApiClient {
    pub fn interventions(&self) -> InterventionsApi<'_> {
        InterventionsApi::new(self)
    }
}
