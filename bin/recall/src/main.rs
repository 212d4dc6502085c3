mod config;
mod snapshot;
mod tracing;

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use recall_srs::{CardId, Grade, Scheduler, format_interval};

use crate::{config::CliConfig, snapshot::Snapshot};

/// Pick the next flashcard to review and report study statistics
#[derive(Debug, Parser)]
#[command(name = "recall", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the card to review next
    Next(NextArgs),
    /// Print new/due/learning/mature counts
    Stats {
        /// Snapshot file with cards and states
        snapshot: PathBuf,
    },
    /// Grade a card and print its updated state
    Review {
        /// Snapshot file with cards and states
        snapshot: PathBuf,
        /// Card to grade
        card_id: String,
        /// again, hard, good or easy (1-4)
        grade: Grade,
    },
}

#[derive(Debug, Args)]
struct NextArgs {
    /// Snapshot file with cards and states
    snapshot: PathBuf,
    /// Recycle not-yet-due cards when nothing else is left
    #[arg(long)]
    loop_mode: bool,
    /// Skip this card, e.g. the one just answered
    #[arg(long)]
    exclude: Option<String>,
    /// Cards reviewed earlier in the session, most recent first
    #[arg(long = "recent")]
    recent: Vec<String>,
    /// New cards already introduced today
    #[arg(long, default_value_t = 0)]
    today_new: u32,
    /// Daily cap on new cards (defaults to RECALL_NEW_CARDS_PER_DAY or 20)
    #[arg(long)]
    new_per_day: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = CliConfig::from_env()?;

    crate::tracing::init_tracing(config.environment);

    let scheduler = Scheduler::new(config.scheduler);
    let now = Utc::now();

    match cli.command {
        Command::Next(args) => {
            let index = Snapshot::load(&args.snapshot)?.into_index(now)?;

            let mut options = scheduler
                .options()
                .with_loop_mode(args.loop_mode)
                .with_today_new_card_count(args.today_new)
                .with_recent(args.recent);
            if let Some(cap) = args.new_per_day {
                options = options.with_new_cards_per_day(cap);
            }
            if let Some(exclude) = args.exclude {
                options = options.excluding(exclude);
            }

            match scheduler.next_card(&index, now, &options) {
                Some(card) => println!("{}", serde_json::to_string_pretty(card)?),
                None => println!("No card available"),
            }
        }
        Command::Stats { snapshot } => {
            let index = Snapshot::load(&snapshot)?.into_index(now)?;
            let stats = scheduler.stats(&index, now);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Review {
            snapshot,
            card_id,
            grade,
        } => {
            let index = Snapshot::load(&snapshot)?.into_index(now)?;
            let card_id = CardId::new(card_id);
            let state = index
                .state(&card_id)
                .ok_or_else(|| anyhow::anyhow!("Unknown card: {card_id}"))?;

            let next = scheduler.grade(state, grade, now);
            println!("{}", serde_json::to_string_pretty(&next)?);

            let [again, hard, good, easy] = scheduler.preview(state, now);
            println!(
                "Next review in {} (again {}, hard {}, good {}, easy {})",
                format_interval(next.interval_days),
                format_interval(again),
                format_interval(hard),
                format_interval(good),
                format_interval(easy)
            );
        }
    }

    Ok(())
}
