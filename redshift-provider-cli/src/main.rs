//! Local invoke harness for the Redshift resource providers
//!
//! Plays the orchestration host's role for manual testing: reads a JSON
//! request file, dispatches to the chosen handler, re-invokes after the
//! reported callback delay while the operation is in progress, and prints
//! the final progress event as JSON.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use redshift_provider_core::{Action, CallbackContext, ProgressEvent, ResourceHandlerRequest};
use redshift_provider_resources as resources;

#[derive(Parser)]
#[command(name = "redshift-provider")]
#[command(about = "Invoke Redshift resource lifecycle handlers locally", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a lifecycle handler and drive it to completion
    Invoke {
        /// Resource family to invoke
        #[arg(value_enum)]
        resource: ResourceKind,

        /// Lifecycle action
        #[arg(value_enum)]
        action: CliAction,

        /// Path to a JSON request file (desired/previous state, tokens)
        #[arg(long, default_value = "request.json")]
        request: PathBuf,

        /// AWS region override
        #[arg(long)]
        region: Option<String>,

        /// Maximum in-progress re-invocations before giving up
        #[arg(long, default_value_t = 60)]
        max_polls: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceKind {
    SubnetGroup,
    EndpointAccess,
    EventSubscription,
    ResourcePolicy,
    SecurityGroup,
    ScheduledAction,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAction {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl From<CliAction> for Action {
    fn from(action: CliAction) -> Self {
        match action {
            CliAction::Create => Action::Create,
            CliAction::Read => Action::Read,
            CliAction::Update => Action::Update,
            CliAction::Delete => Action::Delete,
            CliAction::List => Action::List,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Invoke {
            resource,
            action,
            request,
            region,
            max_polls,
        } => run_invoke(resource, action.into(), &request, region, max_polls).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_invoke(
    resource: ResourceKind,
    action: Action,
    request_path: &Path,
    region: Option<String>,
    max_polls: u32,
) -> Result<(), String> {
    let raw = fs::read_to_string(request_path)
        .map_err(|e| format!("failed to read {}: {}", request_path.display(), e))?;
    let client = resources::build_client(region.as_deref()).await;

    let event = match resource {
        ResourceKind::SubnetGroup => {
            drive(&raw, max_polls, |request, context| async move {
                resources::subnet_group::handle(&client, action, &request, context).await
            })
            .await?
        }
        ResourceKind::EndpointAccess => {
            drive(&raw, max_polls, |request, context| async move {
                resources::endpoint_access::handle(&client, action, &request, context).await
            })
            .await?
        }
        ResourceKind::EventSubscription => {
            drive(&raw, max_polls, |request, context| async move {
                resources::event_subscription::handle(&client, action, &request, context).await
            })
            .await?
        }
        ResourceKind::ResourcePolicy => {
            drive(&raw, max_polls, |request, context| async move {
                resources::resource_policy::handle(&client, action, &request, context).await
            })
            .await?
        }
        ResourceKind::SecurityGroup => {
            drive(&raw, max_polls, |request, context| async move {
                resources::security_group::handle(&client, action, &request, context).await
            })
            .await?
        }
        ResourceKind::ScheduledAction => {
            drive(&raw, max_polls, |request, context| async move {
                resources::scheduled_action::handle(&client, action, &request, context).await
            })
            .await?
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&event).map_err(|e| e.to_string())?
    );
    Ok(())
}

/// Re-invoke the handler while it reports in-progress, replaying the
/// returned model and callback context the way the orchestration host
/// would, and sleeping for the event's callback delay between polls.
async fn drive<M, F, Fut>(
    raw: &str,
    max_polls: u32,
    mut invoke: F,
) -> Result<serde_json::Value, String>
where
    M: Clone + Serialize + DeserializeOwned,
    F: FnMut(ResourceHandlerRequest<M>, CallbackContext) -> Fut,
    Fut: Future<Output = ProgressEvent<M>>,
{
    let mut request: ResourceHandlerRequest<M> =
        serde_json::from_str(raw).map_err(|e| format!("invalid request file: {}", e))?;
    let mut context = CallbackContext::default();
    let mut polls = 0;

    loop {
        let event = invoke(request.clone(), context.clone()).await;
        if event.is_terminal() {
            return serde_json::to_value(&event).map_err(|e| e.to_string());
        }

        polls += 1;
        if polls > max_polls {
            return Err(format!("operation still in progress after {} polls", polls));
        }
        let delay = event.callback_delay_seconds.unwrap_or(5);
        eprintln!(
            "{} poll {} of {}, retrying in {}s",
            "in progress:".yellow(),
            polls,
            max_polls,
            delay
        );

        if let Some(model) = event.resource_model {
            request.desired_state = Some(model);
        }
        context = event.callback_context.unwrap_or_default();
        tokio::time::sleep(Duration::from_secs(delay)).await;
    }
}
