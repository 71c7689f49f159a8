//! Travel scenario runner
//!
//! Runs the travel scenarios against Azure OpenAI and prints a summary.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export AZURE_OPENAI_API_KEY="..."
//! export AZURE_OPENAI_ENDPOINT="https://my-resource.openai.azure.com"
//! export AZURE_OPENAI_DEPLOYMENT_NAME="gpt-4o"
//!
//! # Run every scenario
//! cargo run --bin travel-scenarios -p agent-travel
//!
//! # Run one, without caching
//! cargo run --bin travel-scenarios -p agent-travel -- --scenario simple --cache-key ""
//! ```

use agent_scenario::ScenarioConfig;
use agent_travel::inspect::summary_table;
use agent_travel::{SuiteContext, TravelScenario};
use agent_utils::Settings;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

/// Cache key used when neither the flag nor `SCENARIO_CACHE_KEY` is set
const DEFAULT_CACHE_KEY: &str = "azure_aoai";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Which {
    Simple,
    Dynamic,
    Multi,
    All,
}

impl Which {
    fn scenarios(self) -> Vec<TravelScenario> {
        match self {
            Which::Simple => vec![TravelScenario::Simple],
            Which::Dynamic => vec![TravelScenario::Dynamic],
            Which::Multi => vec![TravelScenario::MultiAgent],
            Which::All => TravelScenario::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "travel-scenarios")]
#[command(about = "Run travel agent scenarios against Azure OpenAI", long_about = None)]
struct Args {
    /// Scenario to run
    #[arg(short, long, value_enum, default_value_t = Which::All)]
    scenario: Which,

    /// Cache key for agent replies; empty disables caching
    #[arg(long)]
    cache_key: Option<String>,

    /// Log every conversation message
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    agent_utils::init_tracing(args.verbose);

    let settings = Settings::from_env();
    let cache_key = args.cache_key.unwrap_or_else(|| {
        if settings.cache_key.is_empty() {
            DEFAULT_CACHE_KEY.to_string()
        } else {
            settings.cache_key.clone()
        }
    });

    let config = ScenarioConfig::from_settings(&settings)
        .with_cache_key(cache_key)
        .with_verbose(args.verbose);
    let ctx = SuiteContext::from_settings(&settings, config)?;

    let mut results = Vec::new();
    for scenario in args.scenario.scenarios() {
        info!(%scenario, "Running scenario");
        match scenario.run(&ctx).await {
            Ok(result) => results.push((scenario, result)),
            Err(e) => {
                error!(%scenario, error = %e, "Scenario failed");
                print_summary(&results);
                return Err(e).with_context(|| format!("scenario '{scenario}' failed"));
            }
        }
    }

    print_summary(&results);
    println!("All scenarios completed");

    Ok(())
}

fn print_summary(results: &[(TravelScenario, agent_scenario::ScenarioResult)]) {
    if results.is_empty() {
        return;
    }
    let rows = results.iter().map(|(scenario, result)| (scenario.name(), result));
    println!("{}", summary_table(rows));
}
