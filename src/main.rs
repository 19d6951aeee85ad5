mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use tracing::Level;

use newsbrief::errors::Error;
use newsbrief::{Brief, Config, Database, SystemClock};

use crate::output::{ErrorResponse, print_json};

/// newsbrief - Interest-ranked AI news briefs
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the configured database path
    #[arg(long, global = true)]
    database: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    if cli.command.is_standalone() {
        return commands::execute_standalone(&cli.command, cli.json);
    }

    let mut config = Config::load()?;
    if let Some(path) = &cli.database {
        config.database_path = path.clone();
    }
    config.ensure_directories()?;

    let db = Database::open(&config.database_path)?;
    let mut brief = Brief::open(
        Rc::new(db),
        Rc::new(SystemClock),
        config.decay()?,
        config.ranking(),
    );

    commands::execute(&cli.command, &mut brief, cli.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::{Commands, DirectionArg, SourceCommands};
    use newsbrief::interest::Direction;

    #[test]
    fn test_cli_parsing_interact() {
        let cli = Cli::parse_from(["newsbrief", "interact", "Tech", "Finance"]);
        match cli.command {
            Commands::Interact { tags } => assert_eq!(tags, vec!["Tech", "Finance"]),
            _ => panic!("expected interact"),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_interact_requires_tags() {
        assert!(Cli::try_parse_from(["newsbrief", "interact"]).is_err());
    }

    #[test]
    fn test_cli_parsing_adjust() {
        let cli = Cli::parse_from(["newsbrief", "adjust", "Tech", "down", "--json"]);
        match cli.command {
            Commands::Adjust { tag, direction } => {
                assert_eq!(tag, "Tech");
                assert_eq!(direction, DirectionArg::Down);
                assert_eq!(Direction::from(direction), Direction::Down);
            }
            _ => panic!("expected adjust"),
        }
        assert!(cli.json);
    }

    #[test]
    fn test_cli_parsing_sources_update() {
        let cli = Cli::parse_from(["newsbrief", "sources", "update", "1", "Name", "https://x"]);
        assert!(matches!(
            cli.command,
            Commands::Sources(SourceCommands::Update { .. })
        ));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["newsbrief", "-v", "--database", "/tmp/b.db", "feed"]);
        assert!(cli.verbose);
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/b.db")));
        assert!(matches!(cli.command, Commands::Feed));
    }

    #[test]
    fn test_standalone_commands() {
        let cli = Cli::parse_from(["newsbrief", "diff", "a b", "a c"]);
        assert!(cli.command.is_standalone());
        let cli = Cli::parse_from(["newsbrief", "for-you"]);
        assert!(!cli.command.is_standalone());
    }
}
