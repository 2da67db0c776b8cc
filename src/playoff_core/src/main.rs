//! Playoff odds CLI
//!
//! Prints qualification chances for every team and checks individual
//! predictions against the remaining fixtures.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use playoff_core::constants::DEFAULT_CONFIDENCE;
use playoff_core::{Ranking, Season, SeasonConfig};

#[derive(Parser)]
#[command(name = "playoff-odds")]
#[command(about = "Playoff qualification odds from the remaining fixtures", long_about = None)]
struct Cli {
    /// Season seed file (TOML); defaults to the bundled seed
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current standings
    Table,

    /// Qualification chance for every team
    Chances {
        /// Only report this team
        #[arg(long)]
        team: Option<String>,

        /// Estimate from this many random scenarios instead of enumerating all
        #[arg(long)]
        samples: Option<u64>,

        /// Seed for sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Apply a full prediction and check one team
    Predict {
        /// Predicted winner, once per remaining fixture in order; prompts when omitted
        #[arg(long = "winner")]
        winners: Vec<String>,

        /// Team to check
        #[arg(long)]
        team: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PLAYOFF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SeasonConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SeasonConfig::bundled()?,
    };
    let order = config.team_names();
    let season = config.into_season()?;

    match cli.command {
        Commands::Table => {
            println!("Current Points Table:");
            print_table(&season.current_ranking());
        }

        Commands::Chances { team, samples, seed } => {
            let teams = match team {
                Some(name) => {
                    season.table().require(&name)?;
                    vec![name]
                }
                None => order,
            };

            println!("Qualification Chances for Each Team (%):");
            println!("----------------------------------------");
            match samples {
                Some(samples) => {
                    let sampled = season.estimate_rates(samples, seed, DEFAULT_CONFIDENCE)?;
                    for name in &teams {
                        let e = sampled.get(name)?;
                        println!(
                            "{:<6} : {:>7.3}%  ({:.3}% - {:.3}%)",
                            name,
                            e.rate * 100.0,
                            e.lower * 100.0,
                            e.upper * 100.0
                        );
                    }
                    println!(
                        "\n{} sampled scenarios, {:.0}% confidence intervals",
                        sampled.samples,
                        sampled.confidence * 100.0
                    );
                }
                None => {
                    let counts = season.qualification_counts(None)?;
                    for name in &teams {
                        println!("{:<6} : {:>7.3}%", name, counts.rate(name)? * 100.0);
                    }
                    println!("\n{} scenarios enumerated", counts.total);
                }
            }
        }

        Commands::Predict { winners, team } => {
            season.table().require(&team)?;
            let winners = if winners.is_empty() {
                prompt_winners(&season)?
            } else {
                winners
            };

            let outcome = season.evaluate_prediction(&winners[..], &team)?;
            println!("\nFinal Points Table:");
            print_table(&outcome.ranking);

            let verdict = if outcome.qualifies {
                "QUALIFIES"
            } else {
                "DOES NOT QUALIFY"
            };
            println!("\n{} {} for playoffs (position {}).", team, verdict, outcome.position + 1);
        }
    }

    Ok(())
}

/// Ask for a winner for each remaining fixture, re-asking on bad input.
fn prompt_winners(season: &Season) -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut winners = Vec::with_capacity(season.fixtures().len());

    println!("Please enter your predictions for the remaining matches (team names only):");
    for (index, fixture) in season.fixtures().iter().enumerate() {
        println!("Match {}: {}", index + 1, fixture);
        loop {
            print!("Enter predicted winner: ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                bail!("input ended before match {} was predicted", index + 1);
            };
            let winner = line?.trim().to_string();
            match fixture.resolve(index, &winner) {
                Ok(_) => {
                    winners.push(winner);
                    break;
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    }

    Ok(winners)
}

fn print_table(ranking: &Ranking) {
    println!("{:<4} {:<6} {:>3} {:>3} {:>3} {:>3} {:>4}", "#", "Team", "P", "W", "L", "NR", "Pts");
    for (i, team) in ranking.iter().enumerate() {
        println!(
            "{:<4} {:<6} {:>3} {:>3} {:>3} {:>3} {:>4}",
            i + 1,
            team.name,
            team.played,
            team.won,
            team.lost(),
            team.no_result,
            team.points
        );
    }
}
