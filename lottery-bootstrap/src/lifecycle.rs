use anyhow::{anyhow, Result};
use tokio::task::JoinHandle;
use tracing::warn;

use lottery_application::commands::{import_commands, sync_commands};
use lottery_application::queries::history_queries;
use lottery_application::ProgressSink;
use lottery_domain::{GameId, NumberCount};

use crate::cli::Command;
use crate::context::AppContext;

pub async fn run(context: &AppContext, command: Command) -> Result<()> {
    let state = &context.state;
    match command {
        Command::Games => {
            for summary in history_queries::list_games(state).await {
                println!(
                    "{:<12} {:<24} {:>7} draws  latest {}",
                    summary.game,
                    summary.name,
                    summary.draws,
                    summary.latest_period.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Sync { game, all } => {
            let (progress, printer) = spawn_progress_printer(context.config.progress_buffer);
            let totals = if all {
                sync_commands::sync_all(state, &progress).await
            } else {
                let game = parse_game(game.as_deref().unwrap_or_default())?;
                let total = sync_commands::sync_history(state, game, &progress).await?;
                vec![(game, total)]
            };
            drop(progress);
            wait_for_printer(printer).await;
            for (game, total) in totals {
                println!("{}: {} draws stored", game, total);
            }
        }
        Command::Import { game, path } => {
            let game = parse_game(&game)?;
            let outcome = import_commands::import_file(state, game, &path).await?;
            println!(
                "{}: {} draws added, {} rows skipped",
                game, outcome.added, outcome.skipped
            );
            if outcome.unreadable {
                return Err(anyhow!("cannot open {}", path.display()));
            }
        }
        Command::Stats { game, top } => {
            let game = parse_game(&game)?;
            let profile = history_queries::profile(state, game).await?;
            let index = history_queries::frequency_index(state, game).await?;
            let hot = history_queries::hot_numbers(state, game, top).await?;
            println!("{} ({} numbers counted)", profile.name, index.primary_total());
            print_counts(&hot);
            if let Some(label) = &profile.special_label {
                println!("{} ({} counted)", label, index.special_total());
                print_counts(&index.special.iter().take(top).copied().collect::<Vec<_>>());
            }
        }
        Command::Latest { game, limit } => {
            let game = parse_game(&game)?;
            for record in history_queries::records(state, game, limit).await? {
                let numbers = record
                    .numbers
                    .iter()
                    .map(|n| format!("{:02}", n))
                    .collect::<Vec<_>>()
                    .join(" ");
                match record.special_number {
                    Some(special) => println!(
                        "{}  {}  {}  [{:02}]",
                        record.period, record.draw_date, numbers, special
                    ),
                    None => println!("{}  {}  {}", record.period, record.draw_date, numbers),
                }
            }
        }
    }
    Ok(())
}

fn parse_game(key: &str) -> Result<GameId> {
    key.parse::<GameId>().map_err(|err| anyhow!("{}", err))
}

fn print_counts(counts: &[NumberCount]) {
    for entry in counts {
        println!("  {:02}  x{}", entry.number, entry.count);
    }
}

async fn wait_for_printer(printer: JoinHandle<()>) {
    if let Err(err) = printer.await {
        warn!("progress printer stopped: {}", err);
    }
}

fn spawn_progress_printer(capacity: usize) -> (ProgressSink, JoinHandle<()>) {
    let (sink, mut rx) = ProgressSink::channel(capacity);
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("{}", event);
        }
    });
    (sink, handle)
}
