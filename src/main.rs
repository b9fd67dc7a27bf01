use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use team_balancer::config::{TeamMode, TeamSettings};
use team_balancer::report::BalanceReport;
use team_balancer::snapshot::Snapshot;
use team_balancer::summary::Summary;
use team_balancer::{roster, Allocator, Policy};

#[derive(Parser)]
#[command(name = "team-balancer", version, about = "Split a gym roster into teams.")]
struct Cli {
    /// Settings file, created by `settings` and read by `generate`.
    #[arg(long, global = true, default_value = "team-settings.json")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Allocate a roster into teams and print the result.
    Generate {
        /// JSON array of participant records.
        roster: PathBuf,

        /// Number of teams (overrides the saved settings).
        #[arg(long, conflicts_with = "size")]
        teams: Option<usize>,

        /// Members per team; the team count is derived from the roster size.
        #[arg(long)]
        size: Option<usize>,

        /// tiered or balanced.
        #[arg(long)]
        policy: Option<Policy>,

        /// Fix the shuffle for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Keep the best of this many allocations.
        #[arg(long, default_value_t = 1)]
        attempts: usize,

        /// Save the result for display elsewhere.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Print teams as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Update and save the default settings.
    Settings {
        #[arg(long, conflicts_with = "size")]
        teams: Option<usize>,

        #[arg(long)]
        size: Option<usize>,

        #[arg(long)]
        policy: Option<Policy>,
    },
}

fn apply_overrides(
    settings: &mut TeamSettings,
    teams: Option<usize>,
    size: Option<usize>,
    policy: Option<Policy>,
) {
    if let Some(teams) = teams {
        settings.mode = TeamMode::Teams;
        settings.number_of_teams = teams;
    }
    if let Some(size) = size {
        settings.mode = TeamMode::Size;
        settings.team_size = size;
    }
    if let Some(policy) = policy {
        settings.policy = policy;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "team_balancer=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut settings = TeamSettings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    match cli.cmd {
        Cmd::Generate {
            roster: roster_path,
            teams,
            size,
            policy,
            seed,
            attempts,
            snapshot,
            json,
        } => {
            apply_overrides(&mut settings, teams, size, policy);

            let records = roster::load(&roster_path)
                .with_context(|| format!("reading roster {}", roster_path.display()))?;
            let participants = roster::validate(records)?;
            let n_teams = settings.team_count().resolve(participants.len())?;

            let mut allocator = seed.map_or_else(Allocator::from_entropy, Allocator::seeded);
            let teams = allocator.best_of(&participants, n_teams, settings.policy, attempts)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&teams)?);
            } else {
                print!("{}", Summary::new(&teams));
                println!();
                println!("{}", BalanceReport::of(&teams));
            }

            if let Some(path) = snapshot {
                Snapshot::new(teams, settings)
                    .save(&path)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!(path = %path.display(), "snapshot saved");
            }
        }
        Cmd::Settings { teams, size, policy } => {
            apply_overrides(&mut settings, teams, size, policy);
            settings.validate()?;
            settings
                .save(&cli.config)
                .with_context(|| format!("saving settings to {}", cli.config.display()))?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
