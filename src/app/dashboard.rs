use crate::app::scope::ViewScope;
use crate::app::state::ViewState;
use crate::core::http::ApiClient;
use crate::domain::model::InterventionWithScores;

/// Ranked list of interventions by net benefit.
#[derive(Debug)]
pub struct DashboardView {
    client: ApiClient,
    scope: ViewScope,
    limit: Option<u32>,
    loading: bool,
    state: ViewState<Vec<InterventionWithScores>>,
}

impl DashboardView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            limit: None,
            loading: false,
            state: ViewState::Empty,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &ViewState<Vec<InterventionWithScores>> {
        &self.state
    }

    pub fn rows(&self) -> &[InterventionWithScores] {
        self.state.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let recommendations = self.client.recommendations();
        let Some(result) = self
            .scope
            .run(recommendations.top_interventions(self.limit))
            .await
        else {
            return;
        };

        if let Ok(rows) = &result {
            for row in rows.iter().filter(|r| !r.net_benefit_consistent()) {
                tracing::warn!(
                    "⚠️ Intervention {} reports net_benefit {} but benefit - risk = {}",
                    row.id,
                    row.net_benefit,
                    row.benefit_score - row.risk_score
                );
            }
        }

        self.state = ViewState::settle(result, "top interventions", "Failed to load dashboard");
        self.loading = false;
    }
}
