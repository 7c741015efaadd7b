use clap::Parser;
use longevity_client::app::{DashboardView, InterventionDetailView, LoginForm, ViewState};
use longevity_client::config::cli::{
    Command, EvidenceCommand, InterventionsCommand, TrackingCommand,
};
use longevity_client::domain::ports::TokenStore;
use longevity_client::domain::{Credentials, InterventionFilter, NewUser, Page};
use longevity_client::utils::error::ErrorSeverity;
use longevity_client::utils::{logger, validation::Validate};
use longevity_client::{
    ApiClient, ApiError, CliConfig, ClientConfig, FileTokenStore, LocalStorage, Result, Session,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    if cli.json_logs(&config) {
        logger::init_json_logger(cli.verbose(&config));
    } else {
        logger::init_cli_logger(cli.verbose(&config));
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(3);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn token_store(config: &ClientConfig) -> FileTokenStore<LocalStorage> {
    let path = Path::new(&config.session.file);
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "session.json".to_string());
    FileTokenStore::new(LocalStorage::new(dir), file_name)
}

async fn require_session(store: &dyn TokenStore) -> Result<Session> {
    store.load().await?.ok_or_else(|| ApiError::MissingConfigError {
        field: "session (run `longevity login` first)".to_string(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn view_result<T>(state: &ViewState<T>, what: &str) -> Result<()> {
    match state {
        ViewState::Failed(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(1);
        }
        ViewState::NotFound => {
            eprintln!("🔍 {} not found", what);
            std::process::exit(4);
        }
        ViewState::Empty | ViewState::Ready(_) => Ok(()),
    }
}

async fn run(command: Command, config: &ClientConfig) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = Arc::new(token_store(config));

    match command {
        Command::Health => print_json(&client.health_check().await?),
        Command::Interventions(cmd) => run_interventions(cmd, &client).await,
        Command::Evidence(cmd) => run_evidence(cmd, &client).await,
        Command::Top { limit } => {
            let mut view = DashboardView::new(client);
            if let Some(limit) = limit {
                view = view.with_limit(limit);
            }
            view.load().await;
            view_result(view.state(), "Top interventions")?;
            for (rank, row) in view.rows().iter().enumerate() {
                println!(
                    "{:>2}. {:<40} {:<10} L{}  benefit {:>6.1}  risk {:>6.1}  net {:>6.1}",
                    rank + 1,
                    row.name,
                    row.category,
                    row.evidence_level,
                    row.benefit_score,
                    row.risk_score,
                    row.net_benefit
                );
            }
            Ok(())
        }
        Command::Recommendations {
            user_id,
            skip,
            limit,
        } => {
            let page = Page { skip, limit };
            print_json(&client.recommendations().list_by_user(&user_id, page).await?)
        }
        Command::Tracking(cmd) => run_tracking(cmd, &client).await,
        Command::Personalized {
            user_id,
            limit,
            exclude,
        } => print_json(&client.personalized().for_user(user_id, limit, &exclude).await?),
        Command::Explain {
            user_id,
            intervention_id,
        } => match client.personalized().explain(user_id, intervention_id).await? {
            Some(explanation) => print_json(&explanation),
            None => {
                eprintln!("🔍 Intervention {} not found", intervention_id);
                std::process::exit(4);
            }
        },
        Command::Register {
            username,
            email,
            password,
            full_name,
        } => {
            let user = NewUser {
                username,
                email,
                password,
                full_name,
            };
            print_json(&client.auth().register(&user).await?)
        }
        Command::Login { username, password } => {
            let mut form = LoginForm::new(client, store);
            if form.submit(&Credentials::new(username, password)).await {
                println!("✅ Logged in, session saved to {}", config.session.file);
                Ok(())
            } else {
                eprintln!("❌ {}", form.error().unwrap_or("Login failed"));
                std::process::exit(1);
            }
        }
        Command::Logout => {
            if let Some(session) = store.load().await? {
                client.auth().logout(&session).await?;
            }
            store.clear().await?;
            println!("👋 Logged out");
            Ok(())
        }
        Command::Refresh => {
            let session = require_session(store.as_ref()).await?;
            let tokens = client.auth().refresh(&session).await?;
            store.save(&session.with_tokens(tokens)).await?;
            println!("🔄 Access token refreshed");
            Ok(())
        }
        Command::Me => {
            let session = require_session(store.as_ref()).await?;
            print_json(&client.auth().current_user(&session).await?)
        }
        Command::Profile => {
            let session = require_session(store.as_ref()).await?;
            print_json(&client.auth().health_profile(&session).await?)
        }
    }
}

async fn run_interventions(command: InterventionsCommand, client: &ApiClient) -> Result<()> {
    let interventions = client.interventions();
    match command {
        InterventionsCommand::List {
            skip,
            limit,
            category,
        } => {
            let filter = InterventionFilter {
                skip,
                limit,
                category,
            };
            print_json(&interventions.list(filter).await?)
        }
        InterventionsCommand::Show { id } => {
            let mut view = InterventionDetailView::new(client.clone());
            view.load(id).await;
            view_result(view.state(), "Intervention")?;
            if let Some(detail) = view.state().ready() {
                let intervention = &detail.intervention;
                println!(
                    "{} [{}] evidence level {} ({})",
                    intervention.name,
                    intervention.category,
                    intervention.evidence_level,
                    intervention.evidence_level.label()
                );
                if let Some(mechanism) = &intervention.mechanism {
                    println!("  mechanism: {}", mechanism);
                }
                for evidence in &detail.evidence {
                    let flag = match &evidence.effect_size {
                        Some(effect) if !effect.ci_is_consistent() => " ⚠️ CI excludes estimate",
                        _ => "",
                    };
                    println!(
                        "  - {}{}",
                        evidence.citation.as_deref().unwrap_or("(no citation)"),
                        flag
                    );
                }
            }
            Ok(())
        }
        InterventionsCommand::Search { query } => {
            print_json(&interventions.search_by_name(&query).await?)
        }
        InterventionsCommand::ByLevel { level } => {
            print_json(&interventions.by_evidence_level(level).await?)
        }
        InterventionsCommand::Delete { id } => {
            interventions.delete(id).await?;
            println!("🗑️ Deleted intervention {}", id);
            Ok(())
        }
    }
}

async fn run_evidence(command: EvidenceCommand, client: &ApiClient) -> Result<()> {
    let evidence = client.evidence();
    match command {
        EvidenceCommand::ForIntervention { id, skip, limit } => {
            print_json(&evidence.list_by_intervention(id, Page { skip, limit }).await?)
        }
        EvidenceCommand::Get { id } => print_json(&evidence.get(id).await?),
        EvidenceCommand::ByQuality { min_quality } => {
            print_json(&evidence.by_quality(min_quality).await?)
        }
        EvidenceCommand::MetaAnalyses => print_json(&evidence.meta_analyses().await?),
        EvidenceCommand::RandomizedTrials => print_json(&evidence.randomized_trials().await?),
    }
}

async fn run_tracking(command: TrackingCommand, client: &ApiClient) -> Result<()> {
    let tracking = client.tracking();
    match command {
        TrackingCommand::List {
            user_id,
            status,
            skip,
            limit,
        } => print_json(
            &tracking
                .list_by_user(user_id, Page { skip, limit }, status)
                .await?,
        ),
        TrackingCommand::Progress { tracking_id } => {
            print_json(&tracking.progress(tracking_id).await?)
        }
        TrackingCommand::Goals { user_id, active } => {
            let goals = if active {
                tracking.active_goals(user_id).await?
            } else {
                tracking.goals_by_user(user_id).await?
            };
            print_json(&goals)
        }
        TrackingCommand::Biomarkers {
            user_id,
            name,
            skip,
            limit,
        } => print_json(
            &tracking
                .biomarkers_by_user(user_id, Page { skip, limit }, name.as_deref())
                .await?,
        ),
        TrackingCommand::Trend {
            user_id,
            name,
            days,
        } => print_json(&tracking.biomarker_trend(user_id, &name, days).await?),
    }
}
