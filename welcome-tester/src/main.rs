mod choices;
mod http;
mod probe;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use welcome_core::{CATALOG, GateConfig};

use choices::run_choices;
use probe::{ProbeOptions, print_report, probe_backend};

#[derive(Debug, Parser)]
#[command(name = "welcome-tester", version)]
#[command(about = "QA probe for the welcome page session gate and choice game")]
struct Args {
    /// Print machine-readable JSON instead of the console summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the session gate against a live backend
    Probe {
        /// Origin serving the session API
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,

        /// Cookie header sent with every request (e.g. "sid=...")
        #[arg(long)]
        cookie: Option<String>,

        /// Gate configuration JSON; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fire deferred tasks immediately instead of waiting out their delays
        #[arg(long)]
        no_wait: bool,

        /// Log out after a successful check
        #[arg(long)]
        logout: bool,
    },
    /// Play seeded rounds of the choice game and check every split
    Choices {
        #[arg(long, default_value_t = 100)]
        rounds: usize,

        #[arg(long, default_value_t = 1337)]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.json {
        announce_banner();
    }

    match args.command {
        Command::Probe {
            base_url,
            cookie,
            config,
            no_wait,
            logout,
        } => {
            let config = load_config(config.as_ref())?.with_base_url(&base_url);
            let options = ProbeOptions {
                config,
                wait: !no_wait,
                logout,
                echo: !args.json,
            };
            let report = probe_backend(cookie, &options).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            if !report.valid {
                std::process::exit(1);
            }
        }
        Command::Choices { rounds, seed } => {
            let summary = run_choices(seed, rounds)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} {} rounds (seed {}), {}/{} prompts seen, chosen share {}..={}%",
                    "✅".green(),
                    summary.rounds,
                    summary.seed,
                    summary.prompts_seen(),
                    CATALOG.len(),
                    summary.min_pct,
                    summary.max_pct
                );
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GateConfig> {
    let Some(path) = path else {
        return Ok(GateConfig::default_config());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading gate config {}", path.display()))?;
    GateConfig::from_json(&raw).with_context(|| format!("parsing gate config {}", path.display()))
}

fn announce_banner() {
    println!("{}", "👋 Welcome Gate Tester".bright_cyan().bold());
    println!("{}", "======================".cyan());
}
