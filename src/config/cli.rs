use crate::config::toml_config::ClientConfig;
use crate::domain::model::{Category, EvidenceLevel};
use crate::domain::tracking::TrackingStatus;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "longevity")]
#[command(about = "Command-line client for the longevity intervention API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "API server, e.g. http://localhost:8000")]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[arg(long, global = true, help = "Where the login session is stored")]
    pub session_file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that the API server is up
    Health,
    #[command(subcommand)]
    Interventions(InterventionsCommand),
    #[command(subcommand)]
    Evidence(EvidenceCommand),
    /// Interventions ranked by net benefit
    Top {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Recommendations stored for a user
    Recommendations {
        user_id: String,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    #[command(subcommand)]
    Tracking(TrackingCommand),
    /// Interventions scored for one user
    Personalized {
        user_id: i64,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, value_delimiter = ',', help = "Categories to leave out, comma separated")]
        exclude: Vec<Category>,
    },
    /// Score breakdown of one intervention for one user
    Explain { user_id: i64, intervention_id: i64 },
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Exchange the stored refresh token for a new access token
    Refresh,
    /// Show the logged-in user
    Me,
    /// Show the logged-in user's health profile
    Profile,
}

#[derive(Debug, Clone, Subcommand)]
pub enum InterventionsCommand {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Intervention with its evidence
    Show { id: i64 },
    Search { query: String },
    ByLevel { level: EvidenceLevel },
    Delete { id: i64 },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EvidenceCommand {
    ForIntervention {
        id: i64,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get { id: i64 },
    ByQuality {
        #[arg(long, default_value = "70")]
        min_quality: f64,
    },
    MetaAnalyses,
    RandomizedTrials,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TrackingCommand {
    /// Interventions a user is tracking
    List {
        user_id: i64,
        #[arg(long)]
        status: Option<TrackingStatus>,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Measurements of one tracking against their baselines
    Progress { tracking_id: i64 },
    Goals {
        user_id: i64,
        #[arg(long, help = "Only goals not yet achieved or missed")]
        active: bool,
    },
    Biomarkers {
        user_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Trend {
        user_id: i64,
        name: String,
        #[arg(long)]
        days: Option<u32>,
    },
}

impl CliConfig {
    /// Config file (or defaults) with command-line flags layered on top.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.api.timeout_ms = timeout_ms;
        }
        if let Some(session_file) = &self.session_file {
            config.session.file = session_file.clone();
        }

        Ok(config)
    }

    pub fn verbose(&self, config: &ClientConfig) -> bool {
        self.verbose || config.verbose()
    }

    pub fn json_logs(&self, config: &ClientConfig) -> bool {
        self.json_logs || config.json_logging()
    }
}
