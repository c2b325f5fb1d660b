use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trip_replay::api::{ApiClient, MockRouteSource};
use trip_replay::cache::CachedRouteSource;
use trip_replay::config::AppConfig;
use trip_replay::driver::{DriverSession, RouteSource};
use trip_replay::map::LogMap;
use trip_replay::new_route::{preview_route, save_route};
use trip_replay::replay::ReplayState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Replay recorded trips on a map, faster than real time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Drive(DriveCommand),

    /// Preview directions between two places, optionally saving the route
    Plan {
        origin: String,
        destination: String,

        /// Persist the previewed route
        #[arg(long)]
        save: bool,
    },
}

/// Commands that read persisted routes.
#[derive(Subcommand, Debug)]
enum DriveCommand {
    /// List available routes
    List,

    /// Draw a route and replay its trip; Ctrl-C cancels
    Replay {
        /// Route id
        route_id: String,

        /// Scale factor; defaults to TRIP_REPLAY_SCALE or 100
        #[arg(allow_negative_numbers = true)]
        scale: Option<f64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;

    let command = match command {
        Command::Drive(command) => command,
        Command::Plan {
            origin,
            destination,
            save,
        } => return plan(&config, &origin, &destination, save).await,
    };

    match &config.mock_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving routes from mock data");
            let source = MockRouteSource::new(dir)?;
            drive(&config, source, command).await
        }
        None => {
            let client = ApiClient::new(config.api.clone())?;
            let source = CachedRouteSource::new(client, &config.cache);
            drive(&config, source, command).await
        }
    }
}

async fn drive<S: RouteSource>(
    config: &AppConfig,
    source: S,
    command: DriveCommand,
) -> Result<(), BoxError> {
    let map = Arc::new(LogMap::new(&config.map, None));
    let mut session = DriverSession::new(source, map, config.playback.clone());

    match command {
        DriveCommand::List => {
            let routes = session.routes().await;
            if routes.is_empty() {
                println!("No routes available.");
            }
            for route in routes {
                let note = if route.is_replayable() { "" } else { "\t(no steps)" };
                println!("{}\t{}{note}", route.id, route.name);
            }
            Ok(())
        }
        DriveCommand::Replay { route_id, scale } => {
            if session.select_route(&route_id).await.is_none() {
                return Err(format!("route {route_id:?} could not be loaded").into());
            }

            let scale = scale.unwrap_or(config.playback.scale);
            let handle = session
                .start_trip(scale)
                .ok_or_else(|| format!("route {route_id:?} has nothing to replay"))?;

            let state = tokio::select! {
                state = handle.finished() => state,
                _ = tokio::signal::ctrl_c() => {
                    warn!("interrupted");
                    session.cancel_trip();
                    handle.finished().await
                }
            };

            match state {
                ReplayState::Failed(e) => Err(e.into()),
                state => {
                    println!("Replay of {route_id} ended: {state:?}");
                    Ok(())
                }
            }
        }
    }
}

async fn plan(config: &AppConfig, origin: &str, destination: &str, save: bool) -> Result<(), BoxError> {
    if config.mock_dir.is_some() {
        return Err("planning a route needs the backend; unset TRIP_REPLAY_MOCK_DIR".into());
    }

    let client = ApiClient::new(config.api.clone())?;
    let map = LogMap::new(&config.map, None);

    let draft = preview_route(&client, &map, origin, destination).await?;
    println!("Origin:      {}", draft.start_address.as_deref().unwrap_or("?"));
    println!("Destination: {}", draft.end_address.as_deref().unwrap_or("?"));
    println!("Steps:       {}", draft.directions.step_count());

    if save {
        let route = save_route(&client, &draft).await?;
        println!("Saved route {} ({})", route.id, route.name);
    }

    Ok(())
}
