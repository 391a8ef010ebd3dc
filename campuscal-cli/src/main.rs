mod client;
mod commands;
mod store;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use campuscal_core::audit::AuditSink;
use campuscal_core::config::{CampusCalConfig, TOKEN_ENV};
use campuscal_core::lifecycle::LifecycleManager;
use campuscal_core::notify::ChangeNotifier;
use campuscal_core::profile::Profile;
use campuscal_core::store::LocalStore;

use crate::client::RemoteClient;
use crate::commands::approve::Decision;
use crate::commands::create::CreateArgs;
use crate::store::{CachedStore, OfflineAuditSink};

#[derive(Parser)]
#[command(name = "campuscal")]
#[command(about = "Propose, approve and browse academic calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month calendar of approved events
    Calendar {
        /// Month to display (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Select a date and list its approved events (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List events on a date
    Events {
        /// Date to list (YYYY-MM-DD)
        date: String,

        /// Include rejected events
        #[arg(long)]
        all: bool,
    },
    /// List events awaiting a decision
    Pending,
    /// Propose a new event
    Create {
        title: String,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start hour (HH:MM)
        #[arg(long)]
        from: String,

        /// End hour (HH:MM)
        #[arg(long)]
        to: String,

        #[arg(short, long)]
        location: String,

        #[arg(short, long)]
        course: String,

        #[arg(short = 'T', long)]
        tutor: String,

        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Approve a pending event
    Approve {
        /// Event id
        id: i64,
    },
    /// Reject a pending event
    Reject {
        /// Event id
        id: i64,
    },
    /// Download a CSV export of events between two dates
    Export {
        /// First day to export (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Last day to export (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// Show the audit trail (administrators only)
    Audit {
        /// Page to display, 10 entries per page
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show the acting profile and what it may do
    Profile,
}

pub struct AppContext {
    pub store: Arc<CachedStore>,
    pub manager: LifecycleManager,
    pub remote: Option<RemoteClient>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = build_context()?;

    match cli.command {
        Commands::Calendar { month, date } => {
            commands::calendar::run(&ctx, month.as_deref(), date.as_deref()).await
        }
        Commands::Events { date, all } => commands::events::run(&ctx, &date, all).await,
        Commands::Pending => commands::pending::run(&ctx).await,
        Commands::Create {
            title,
            date,
            from,
            to,
            location,
            course,
            tutor,
            notes,
        } => {
            commands::create::run(
                &ctx,
                CreateArgs {
                    title,
                    date,
                    from,
                    to,
                    location,
                    course,
                    tutor,
                    notes,
                },
            )
            .await
        }
        Commands::Approve { id } => commands::approve::run(&ctx, id, Decision::Approve).await,
        Commands::Reject { id } => commands::approve::run(&ctx, id, Decision::Reject).await,
        Commands::Export { start, end } => {
            commands::export::run(&ctx, start.as_deref(), end.as_deref()).await
        }
        Commands::Audit { page } => commands::audit::run(&ctx, page).await,
        Commands::Profile => commands::profile::run(&ctx).await,
    }
}

fn build_context() -> Result<AppContext> {
    let config = CampusCalConfig::load()?;
    let local = LocalStore::new(config.cache_path()?);
    let remote = config
        .token()
        .map(|token| RemoteClient::new(config.api_base.clone(), Some(token)));

    let store = Arc::new(CachedStore::new(remote.clone(), local));
    let audit: Arc<dyn AuditSink> = match &remote {
        Some(client) => Arc::new(client.clone()),
        None => Arc::new(OfflineAuditSink),
    };
    let manager = LifecycleManager::new(store.clone(), audit, ChangeNotifier::new());

    Ok(AppContext {
        store,
        manager,
        remote,
    })
}

/// The acting profile, or a hint on how to get one.
pub async fn require_profile(ctx: &AppContext) -> Result<Profile> {
    match ctx.store.profile().await? {
        Some(profile) => Ok(profile),
        None => anyhow::bail!(
            "No profile available.\n\n\
            Set {} in the environment (or `token` in {}) so campuscal\n\
            can fetch your profile from the calendar service.",
            TOKEN_ENV,
            CampusCalConfig::config_path()?.display()
        ),
    }
}
