use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List enabled games with their stored draw counts
    Games,
    /// Fetch missing draws from the results API
    Sync {
        /// Game key, e.g. lotto_649
        #[arg(required_unless_present = "all")]
        game: Option<String>,
        /// Sync every enabled game
        #[arg(long, conflicts_with = "game")]
        all: bool,
    },
    /// Merge draws from a CSV export
    Import { game: String, path: PathBuf },
    /// Show how often each number was drawn
    Stats {
        game: String,
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Show the newest stored draws
    Latest {
        game: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Harness::try_parse_from(std::iter::once("lottery-stats").chain(args.iter().copied()))
            .map(|harness| harness.command)
    }

    #[test]
    fn sync_needs_a_game_or_all() {
        assert!(parse(&["sync"]).is_err());
        assert!(parse(&["sync", "lotto_649", "--all"]).is_err());
        assert!(matches!(
            parse(&["sync", "--all"]),
            Ok(Command::Sync { game: None, all: true })
        ));
    }

    #[test]
    fn stats_defaults_to_top_ten() {
        match parse(&["stats", "daily_539"]) {
            Ok(Command::Stats { game, top }) => {
                assert_eq!(game, "daily_539");
                assert_eq!(top, 10);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }
}
