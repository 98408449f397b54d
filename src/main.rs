use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod collector;
mod config;
mod formatter;
mod handlers;
mod log;
mod models;
mod routes;
mod snmp;

use collector::{TargetDescriptor, TargetPoller};
use config::AppConfig;
use formatter::JsonFormatter;
use handlers::AppState;

#[derive(Parser)]
#[command(name = "snmp-poller")]
#[command(about = "Poll SNMP devices within a time budget and report their status", long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "POLLER_CONFIG", default_value = "./poller.yaml")]
    config: PathBuf,

    /// Emit logs as JSON (logs always go to stderr)
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll targets and print one JSON report per line
    Poll {
        /// Only poll these targets (repeatable)
        #[arg(short, long = "target")]
        targets: Vec<String>,

        /// Repeat every N seconds until interrupted
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Serve the HTTP API
    Serve {
        /// Address to bind, overrides `listen` from the config
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config.display(), "Config error: {}", e);
            return ExitCode::from(2);
        }
    };

    let executor = snmp::create_executor(&config);
    let poller = TargetPoller::new(executor, Arc::new(log::TracingPollLog));

    let result = match args.command.unwrap_or(Command::Poll {
        targets: Vec::new(),
        interval: None,
    }) {
        Command::Poll { targets, interval } => {
            run_poll(&config, &poller, &targets, interval).await
        }
        Command::Serve { listen } => {
            let listen = listen.unwrap_or_else(|| config.listen.clone());
            let state = AppState {
                config: Arc::new(config),
                poller: Arc::new(poller),
            };
            routes::serve(state, &listen).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "snmp_poller=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Picks the named targets, or all of them when none are named
fn select_targets(config: &AppConfig, names: &[String]) -> Result<Vec<TargetDescriptor>> {
    if names.is_empty() {
        return Ok(config.targets.clone());
    }

    names
        .iter()
        .map(|name| {
            config
                .target(name)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Unknown target '{}'", name))
        })
        .collect()
}

async fn run_poll(
    config: &AppConfig,
    poller: &TargetPoller,
    names: &[String],
    interval: Option<u64>,
) -> Result<()> {
    let targets = select_targets(config, names)?;

    let Some(secs) = interval else {
        return poll_cycle(poller, &targets).await;
    };

    info!(targets = targets.len(), interval_secs = secs, "Polling on an interval");
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => poll_cycle(poller, &targets).await?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                return Ok(());
            }
        }
    }
}

async fn poll_cycle(poller: &TargetPoller, targets: &[TargetDescriptor]) -> Result<()> {
    for report in poller.poll_all(targets).await {
        println!("{}", JsonFormatter::to_json_line(&report)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
targets:
  - { name: a, ip: 10.0.0.1, community: public, oids: [1.3.6.1.2.1.1.3.0] }
  - { name: b, ip: 10.0.0.2, community: public, oids: [1.3.6.1.2.1.1.3.0] }
"#;

    #[test]
    fn selects_all_targets_by_default() {
        let config = AppConfig::from_yaml(CONFIG, |_| None).unwrap();
        let targets = select_targets(&config, &[]).unwrap();
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn selects_named_targets_in_given_order() {
        let config = AppConfig::from_yaml(CONFIG, |_| None).unwrap();
        let targets = select_targets(&config, &["b".to_string(), "a".to_string()]).unwrap();
        assert_eq!(targets[0].name, "b");
        assert_eq!(targets[1].name, "a");
    }

    #[test]
    fn unknown_target_name_is_an_error() {
        let config = AppConfig::from_yaml(CONFIG, |_| None).unwrap();
        assert!(select_targets(&config, &["c".to_string()]).is_err());
    }

    #[test]
    fn parses_cli() {
        let args = Args::try_parse_from([
            "snmp-poller", "--config", "x.yaml", "poll", "-t", "a", "--interval", "60",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("x.yaml"));
        match args.command {
            Some(Command::Poll { targets, interval }) => {
                assert_eq!(targets, ["a"]);
                assert_eq!(interval, Some(60));
            }
            _ => panic!("expected poll"),
        }
    }
}
