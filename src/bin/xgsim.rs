use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use xgsim::config::Config;
use xgsim::data::{TeamRecord, TeamRoster};
use xgsim::mc::MonteCarloEngine;
use xgsim::print::{
    tabulate_expected, tabulate_outcomes, tabulate_summary, tabulate_team_details, tabulate_teams,
    tabulate_top_scores,
};
use xgsim::rate::RateEstimator;
use xgsim::scoregrid::Scoregrid;

const DEFAULT_HOME_ADVANTAGE: f64 = 1.2;

/// Upper bound on goals per side in the analytic scoregrid used for theoretical probabilities.
const MAX_GOALS: u64 = 15;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the team data from
    #[clap(short = 'f', long, default_value = "teams_data.json")]
    file: PathBuf,

    /// home team name
    #[clap(long)]
    home: Option<String>,

    /// season of the home team
    #[clap(long, default_value = "2024-2025")]
    home_season: String,

    /// away team name
    #[clap(long)]
    away: Option<String>,

    /// season of the away team
    #[clap(long, default_value = "2021-2022")]
    away_season: String,

    /// number of simulated matches
    #[clap(short = 'n', long)]
    iterations: Option<u64>,

    /// seed for a reproducible run
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// multiplier applied to the home scoring rate
    #[clap(long, default_value_t = DEFAULT_HOME_ADVANTAGE)]
    home_advantage: f64,

    /// play at a neutral venue, disabling home advantage
    #[clap(long)]
    neutral: bool,

    /// number of parallel workers
    #[clap(short = 'w', long)]
    workers: Option<usize>,

    /// number of most likely scorelines to print
    #[clap(short = 't', long, default_value_t = 5)]
    top: usize,

    /// list the available teams and exit
    #[clap(short = 'l', long)]
    list_teams: bool,

    /// list the teams as a compact table, without details or the league summary
    #[clap(short = 'b', long)]
    brief: bool,

    /// configuration overrides in key=value form
    #[clap(short = 'o', long = "option")]
    options: Vec<String>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.list_teams && (self.home.is_none() || self.away.is_none()) {
            bail!("both --home and --away must be specified unless listing teams");
        }
        Ok(())
    }

    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default().with_home_advantage(self.home_advantage);
        if let Some(iterations) = self.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        for option in &self.options {
            config.apply(option)?;
        }
        if self.neutral {
            config.home_advantage = 1.0;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let roster = TeamRoster::read_json_file(&args.file)?;
    if args.list_teams {
        if args.brief {
            info!("\n{}", Console::default().render(&tabulate_teams(&roster)));
        } else {
            info!("\n{}", Console::default().render(&tabulate_team_details(&roster)));
            if let Some(summary) = roster.summary() {
                info!("\n{}", Console::default().render(&tabulate_summary(&summary)));
            }
        }
        return Ok(());
    }

    let config = args.config()?;
    debug!("config: {config:?}");
    let home = find_team(&roster, args.home.as_deref(), &args.home_season)?;
    let away = find_team(&roster, args.away.as_deref(), &args.away_season)?;
    let (home, away) = (home.profile()?, away.profile()?);

    let rates = RateEstimator::from(&config).estimate(&home, &away)?;
    info!(
        "{home} v {away}: expected goals {:.3} v {:.3} over {} simulations{}",
        rates.home,
        rates.away,
        config.iterations,
        if config.home_advantage == 1.0 {
            " at a neutral venue"
        } else {
            ""
        }
    );
    let result = MonteCarloEngine::from(&config).simulate(&rates)?;
    let scoregrid = Scoregrid::from_rates(&rates, MAX_GOALS);

    let (home_name, away_name) = (home.display_name(), away.display_name());
    info!(
        "\n{}",
        Console::default().render(&tabulate_outcomes(&result, &scoregrid, &home_name, &away_name))
    );
    info!(
        "\n{}",
        Console::default().render(&tabulate_expected(&result, &rates, &home_name, &away_name))
    );
    info!(
        "most likely score: {} ({:.2}% simulated, {:.2}% theoretical)",
        result.most_likely_score,
        result.frequency(&result.most_likely_score) as f64 / result.iterations as f64 * 100.0,
        scoregrid.probability(&result.most_likely_score) * 100.0
    );
    info!(
        "\n{}",
        Console::default().render(&tabulate_top_scores(&result, &scoregrid, args.top))
    );
    Ok(())
}

fn find_team<'a>(
    roster: &'a TeamRoster,
    name: Option<&str>,
    season: &str,
) -> anyhow::Result<&'a TeamRecord> {
    let name = name.ok_or_else(|| anyhow!("team name not specified"))?;
    roster.find(name, season).ok_or_else(|| {
        anyhow!("team '{name}' for season '{season}' not found; use --list-teams to see available teams")
    })
}
