use crate::app::scope::ViewScope;
use crate::app::state::ViewState;
use crate::core::http::ApiClient;
use crate::domain::model::{Evidence, Intervention};
use crate::domain::requests::{InterventionFilter, Page};

const DETAIL_LOAD_FAILED: &str = "Failed to load intervention details";
const LIST_LOAD_FAILED: &str = "Failed to load interventions";

/// Browsable intervention list with category filter and name search.
#[derive(Debug)]
pub struct InterventionListView {
    client: ApiClient,
    scope: ViewScope,
    filter: InterventionFilter,
    loading: bool,
    state: ViewState<Vec<Intervention>>,
}

impl InterventionListView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            filter: InterventionFilter::default(),
            loading: false,
            state: ViewState::Empty,
        }
    }

    pub fn with_filter(mut self, filter: InterventionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &ViewState<Vec<Intervention>> {
        &self.state
    }

    /// Rows to render; empty while nothing has loaded or after a failure.
    pub fn items(&self) -> &[Intervention] {
        self.state.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let interventions = self.client.interventions();
        let Some(result) = self.scope.run(interventions.list(self.filter)).await else {
            tracing::debug!("Intervention list unmounted before response");
            return;
        };
        self.state = ViewState::settle(result, "interventions", LIST_LOAD_FAILED);
        self.loading = false;
    }

    pub async fn search(&mut self, query: &str) {
        self.loading = true;
        let interventions = self.client.interventions();
        let Some(result) = self.scope.run(interventions.search_by_name(query)).await else {
            tracing::debug!("Intervention search unmounted before response");
            return;
        };
        self.state = ViewState::settle(result, "intervention search", LIST_LOAD_FAILED);
        self.loading = false;
    }
}

/// An intervention together with the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionDetail {
    pub intervention: Intervention,
    pub evidence: Vec<Evidence>,
}

/// Detail page. Both sections are fetched concurrently and shown only
/// together: if either request fails, neither is rendered.
#[derive(Debug)]
pub struct InterventionDetailView {
    client: ApiClient,
    scope: ViewScope,
    loading: bool,
    state: ViewState<InterventionDetail>,
}

impl InterventionDetailView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            loading: false,
            state: ViewState::Empty,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &ViewState<InterventionDetail> {
        &self.state
    }

    pub async fn load(&mut self, intervention_id: i64) {
        self.loading = true;

        let interventions = self.client.interventions();
        let evidence = self.client.evidence();
        let joined = self
            .scope
            .run(async {
                tokio::try_join!(
                    interventions.get(intervention_id),
                    evidence.list_by_intervention(intervention_id, Page::default()),
                )
            })
            .await;

        let Some(result) = joined else {
            tracing::debug!("Intervention {} detail unmounted before response", intervention_id);
            return;
        };

        self.state = match result {
            Ok((intervention, evidence)) => ViewState::Ready(InterventionDetail {
                intervention,
                evidence,
            }),
            Err(e) if e.is_not_found() => ViewState::NotFound,
            Err(e) => {
                tracing::error!(
                    "❌ Failed to load intervention {}: {}",
                    intervention_id,
                    e
                );
                ViewState::Failed(DETAIL_LOAD_FAILED.to_string())
            }
        };
        self.loading = false;
    }
}
