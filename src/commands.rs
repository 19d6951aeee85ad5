//! Command handlers for newsbrief CLI.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use newsbrief::diff::{DiffStats, generate_diff};
use newsbrief::errors::Error;
use newsbrief::interest::{Direction, Outcome};
use newsbrief::ranking::{FeedEntry, ScoredItem};
use newsbrief::summary::{GeneratedSummary, Summary};
use newsbrief::Brief;

use crate::output::*;

/// Commands supported by newsbrief CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Record interaction with one or more tags
    Interact {
        /// Tags of the content the user engaged with
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Manually raise or lower interest in a tracked tag
    Adjust {
        tag: String,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
    /// Stop tracking a tag
    Forget { tag: String },
    /// Show decayed interest scores
    Interests {
        /// Show raw stored scores instead
        #[arg(long)]
        raw: bool,
    },
    /// Store a generated summary (JSON from a file, or stdin)
    Ingest {
        /// Topic (cluster) id the summary belongs to
        #[arg(short, long)]
        topic: String,

        /// Number of articles the summary was built from
        #[arg(short, long, default_value = "1")]
        sources: usize,

        /// JSON file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// List stored summaries, newest first
    History {
        /// Maximum number of results (default: 10)
        #[arg(short = 'l', long, default_value = "10")]
        limit: usize,
    },
    /// Latest summary per topic with interest scores
    Feed,
    /// Recommended summaries, best first
    ForYou,
    /// Show how a topic's narrative changed across summaries
    Compare { topic_id: String },
    /// Word-diff two texts
    Diff { before: String, after: String },
    /// Manage news sources
    #[command(subcommand)]
    Sources(SourceCommands),
    /// Print version information
    Version,
}

/// Adjustment direction as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

#[derive(clap::Subcommand)]
pub enum SourceCommands {
    List,
    Add { name: String, url: String },
    Remove { id: String },
    Update { id: String, name: String, url: String },
}

impl Commands {
    /// True for commands that never touch stored state.
    pub fn is_standalone(&self) -> bool {
        matches!(self, Commands::Diff { .. } | Commands::Version)
    }
}

/// Execute a command that needs no stored state.
pub fn execute_standalone(command: &Commands, json: bool) -> Result<ExitCode, Error> {
    match command {
        Commands::Diff { before, after } => handle_diff(before, after, json),
        Commands::Version => handle_version(json),
        _ => Err(Error::InvalidInput(
            "command requires an opened store".to_string(),
        )),
    }
}

/// Execute a CLI command against an opened session.
pub fn execute(command: &Commands, brief: &mut Brief, json: bool) -> Result<ExitCode, Error> {
    match command {
        Commands::Interact { tags } => handle_interact(brief, tags, json),
        Commands::Adjust { tag, direction } => {
            let outcome = brief.interests.adjust_interest(tag, (*direction).into());
            report_outcome(outcome, tag, "adjusted", json)
        }
        Commands::Forget { tag } => {
            let outcome = brief.interests.remove_interest(tag);
            report_outcome(outcome, tag, "removed", json)
        }
        Commands::Interests { raw } => handle_interests(brief, *raw, json),
        Commands::Ingest {
            topic,
            sources,
            file,
        } => handle_ingest(brief, topic, *sources, file.as_deref(), json),
        Commands::History { limit } => handle_history(brief, *limit, json),
        Commands::Feed => {
            let latest = brief.latest();
            let items = brief.feed(&latest).into_iter().map(feed_item).collect();
            print_ranked(items, json);
            Ok(ExitCode::SUCCESS)
        }
        Commands::ForYou => {
            let latest = brief.latest();
            let items = brief.for_you(&latest).into_iter().map(recommended_item).collect();
            print_ranked(items, json);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare { topic_id } => handle_compare(brief, topic_id, json),
        Commands::Sources(cmd) => handle_sources(brief, cmd, json),
        Commands::Diff { .. } | Commands::Version => execute_standalone(command, json),
    }
}

fn handle_interact(brief: &mut Brief, tags: &[String], json: bool) -> Result<ExitCode, Error> {
    let applied = brief.interact(tags);
    if json {
        print_json(&serde_json::json!({ "status": "recorded", "tags": applied }));
    } else {
        println!("Recorded interaction with {} tag(s)", applied);
    }
    Ok(ExitCode::SUCCESS)
}

fn report_outcome(outcome: Outcome, key: &str, verb: &str, json: bool) -> Result<ExitCode, Error> {
    if outcome == Outcome::Unchanged {
        return Err(Error::NotFound(key.to_string()));
    }
    if json {
        print_json(&OutcomeResponse {
            status: verb.to_string(),
            key: key.to_string(),
        });
    } else {
        println!("{} {}", capitalize(verb), key);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_interests(brief: &Brief, raw: bool, json: bool) -> Result<ExitCode, Error> {
    let mut interests: Vec<InterestItem> = if raw {
        brief
            .interests
            .raw_interests()
            .iter()
            .map(|(tag, interest)| InterestItem {
                tag: tag.clone(),
                score: interest.score,
            })
            .collect()
    } else {
        brief
            .interests
            .decayed_interests()
            .into_iter()
            .map(|(tag, score)| InterestItem { tag, score })
            .collect()
    };
    interests.sort_by(|a, b| b.score.total_cmp(&a.score));

    if json {
        print_json(&InterestsResponse { interests });
    } else {
        for item in interests {
            println!("{:>8.2}  {}", item.score, item.tag);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_ingest(
    brief: &mut Brief,
    topic: &str,
    sources: usize,
    file: Option<&Path>,
    json: bool,
) -> Result<ExitCode, Error> {
    if topic.trim().is_empty() {
        return Err(Error::InvalidInput("topic id cannot be empty".to_string()));
    }

    let body = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let generated = GeneratedSummary::from_json(&body)?;
    let summary = brief.ingest(generated, topic, sources);

    if json {
        print_json(&IngestResponse {
            status: "ingested".to_string(),
            id: summary.id,
            topic_id: summary.topic_id,
        });
    } else {
        println!("Ingested summary: {}", summary.id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_history(brief: &Brief, limit: usize, json: bool) -> Result<ExitCode, Error> {
    let summaries = brief.history.summaries().iter().take(limit);
    if json {
        let items = summaries
            .map(|s| HistoryItem {
                id: s.id.clone(),
                topic_id: s.topic_id.clone(),
                title: s.title.clone(),
                generated_at: s.generated_at.to_rfc3339(),
            })
            .collect();
        print_json(&HistoryResponse { summaries: items });
    } else {
        for s in summaries {
            println!("{}  [{}] {}", s.generated_at.to_rfc3339(), s.topic_id, s.title);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn ranked_item(summary: &Summary, score: f64, is_recommended: bool) -> RankedItem {
    RankedItem {
        id: summary.id.clone(),
        topic_id: summary.topic_id.clone(),
        title: summary.title.clone(),
        tags: summary.tags.clone(),
        score,
        is_recommended,
    }
}

fn feed_item(entry: FeedEntry<'_, Summary>) -> RankedItem {
    ranked_item(entry.item, entry.score, entry.is_recommended)
}

fn recommended_item(scored: ScoredItem<'_, Summary>) -> RankedItem {
    ranked_item(scored.item, scored.score, true)
}

fn print_ranked(items: Vec<RankedItem>, json: bool) {
    if json {
        print_json(&RankedResponse { items });
        return;
    }
    for item in items {
        let marker = if item.is_recommended { "*" } else { " " };
        println!(
            "{} {:>6.2}  {}  ({})",
            marker,
            item.score,
            item.title,
            item.tags.join(", ")
        );
    }
}

fn handle_compare(brief: &Brief, topic_id: &str, json: bool) -> Result<ExitCode, Error> {
    let entries = brief.compare(topic_id);
    if entries.is_empty() {
        return Err(Error::NotFound(topic_id.to_string()));
    }

    if json {
        print_json(&NarrativeResponse {
            topic_id: topic_id.to_string(),
            entries,
        });
        return Ok(ExitCode::SUCCESS);
    }

    for entry in entries {
        println!(
            "== {} ({})",
            entry.summary.title,
            entry.summary.generated_at.to_rfc3339()
        );
        println!("{}", render_diff(&entry.summary_diff));
        for point in &entry.key_point_diffs {
            println!("  - {}", render_diff(point));
        }
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_diff(before: &str, after: &str, json: bool) -> Result<ExitCode, Error> {
    let segments = generate_diff(before, after);
    if json {
        print_json(&DiffResponse {
            stats: DiffStats::of(&segments),
            segments,
        });
    } else {
        println!("{}", render_diff(&segments));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_sources(brief: &mut Brief, cmd: &SourceCommands, json: bool) -> Result<ExitCode, Error> {
    match cmd {
        SourceCommands::List => {
            let sources = brief.sources.sources();
            if json {
                print_json(&SourcesResponse { sources });
            } else {
                for source in sources {
                    println!("{}: {} <{}>", source.id, source.name, source.url);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        SourceCommands::Add { name, url } => {
            let source = brief.sources.add(name, url)?;
            if json {
                print_json(&OutcomeResponse {
                    status: "added".to_string(),
                    key: source.id,
                });
            } else {
                println!("Added source: {} ({})", source.name, source.id);
            }
            Ok(ExitCode::SUCCESS)
        }
        SourceCommands::Remove { id } => {
            let outcome = brief.sources.remove(id);
            report_outcome(outcome, id, "removed", json)
        }
        SourceCommands::Update { id, name, url } => {
            let outcome = brief.sources.update(id, name, url)?;
            report_outcome(outcome, id, "updated", json)
        }
    }
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
