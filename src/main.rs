//! Fan timeline CLI
//!
//! Builds synchronized fan-sentiment timelines from collected game-thread
//! comments and play-by-play logs.

use clap::{Parser, Subcommand};
use courtside::{Config, Result};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Fan-sentiment timelines from game threads and play-by-play", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the timeline for a single game
    Timeline {
        /// Game identifier (schedule key and record file stem)
        game_id: String,
        /// Output format
        #[arg(long, default_value = "jsonl")]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Build timelines for every game in the schedule
    Batch {
        /// Override the configured output directory
        #[arg(long)]
        out_dir: Option<String>,
    },
    /// List big scoring runs in a game's play-by-play log
    Runs {
        /// Game identifier
        game_id: String,
        /// Rolling window in countdown seconds
        #[arg(long, default_value = "120")]
        window: u32,
    },
    /// Show input data status
    Status,
    /// Initialize a new project with default config
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Jsonl,
    Json,
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Unknown format: {}. Use jsonl, json, or table.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Timeline {
            game_id,
            format,
            out,
        } => commands::timeline(&config, &game_id, format, out),
        Commands::Batch { out_dir } => commands::batch(&config, out_dir),
        Commands::Runs { game_id, window } => commands::runs(&config, &game_id, window),
        Commands::Status => commands::status(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use chrono::DateTime;
    use courtside::ingest;
    use courtside::timeline::TimelineBuilder;
    use courtside::GameTimeline;
    use std::io::Write;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all(&config.data.comments_dir)?;
        std::fs::create_dir_all(&config.data.pbp_dir)?;
        std::fs::create_dir_all(&config.data.output_dir)?;
        println!("Created data directories");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Drop <game_id>.jsonl files into the comments and pbp directories");
        println!("  3. Add tip-off times to {}", config.data.schedule_path);
        println!("  4. Run 'courtside timeline <game_id>' to build a timeline");

        Ok(())
    }

    pub fn timeline(
        config: &Config,
        game_id: &str,
        format: OutputFormat,
        out: Option<String>,
    ) -> Result<()> {
        let schedule = ingest::load_schedule(&config.data.schedule_path)?;
        let records = ingest::load_game(game_id, &config.data, &schedule)?;

        let builder = TimelineBuilder::new(config);
        let game = builder.build_game(&records);

        let rendered = render(&game, &format)?;
        match out {
            Some(path) => {
                std::fs::write(&path, rendered)?;
                println!("Wrote {} windows to {}", game.entries.len(), path);
            }
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(rendered.as_bytes())?;
            }
        }

        Ok(())
    }

    pub fn batch(config: &Config, out_dir: Option<String>) -> Result<()> {
        let schedule = ingest::load_schedule(&config.data.schedule_path)?;
        let out_dir = out_dir.unwrap_or_else(|| config.data.output_dir.clone());
        std::fs::create_dir_all(&out_dir)?;

        let mut game_ids: Vec<&String> = schedule.keys().collect();
        game_ids.sort();
        println!("Processing {} games...", game_ids.len());

        let builder = TimelineBuilder::new(config);
        let mut processed = 0;
        let mut failed = 0;

        for game_id in game_ids {
            // One bad game never stops the batch
            let records = match ingest::load_game(game_id, &config.data, &schedule) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("Skipping game {}: {}", game_id, e);
                    failed += 1;
                    continue;
                }
            };

            let game = builder.build_game(&records);
            let path = ingest::timeline_path(&out_dir, game_id);
            std::fs::write(&path, render(&game, &OutputFormat::Jsonl)?)?;
            println!("  {} -> {} windows", game_id, game.entries.len());
            processed += 1;
        }

        println!("\nBatch complete: {} processed, {} failed", processed, failed);
        Ok(())
    }

    pub fn runs(config: &Config, game_id: &str, window: u32) -> Result<()> {
        let schedule = ingest::load_schedule(&config.data.schedule_path)?;
        let records = ingest::load_game(game_id, &config.data, &schedule)?;

        let runs = ingest::detect_big_runs(&records.events, window, config.summary.run_points);
        if runs.is_empty() {
            println!("No runs of {}+ points found", config.summary.run_points);
            return Ok(());
        }

        println!("{:>6} {:>8} {:>6} {:>7}", "Period", "Clock", "Team", "Points");
        println!("{}", "-".repeat(32));
        for run in runs {
            println!(
                "{:>6} {:>8} {:>6} {:>7}",
                run.period, run.clock, run.team, run.points
            );
        }

        Ok(())
    }

    pub fn status(config: &Config) -> Result<()> {
        let schedule = ingest::load_schedule(&config.data.schedule_path)?;
        let comment_files = count_files(&config.data.comments_dir);
        let pbp_files = count_files(&config.data.pbp_dir);

        println!("Data Status");
        println!("───────────────────────────────");
        println!("  Schedule:       {} games", schedule.len());
        println!("  Comment files:  {}", comment_files);
        println!("  PBP files:      {}", pbp_files);

        let mut tip_offs: Vec<i64> = schedule.values().copied().collect();
        tip_offs.sort();
        if let (Some(first), Some(last)) = (tip_offs.first(), tip_offs.last()) {
            let fmt = |ts: &i64| {
                DateTime::from_timestamp(*ts, 0)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| format!("unix {}", ts))
            };
            println!("  Range:          {} to {}", fmt(first), fmt(last));
        }

        Ok(())
    }

    fn render(game: &GameTimeline, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Jsonl => {
                let mut out = String::new();
                for entry in &game.entries {
                    out.push_str(&serde_json::to_string(entry)?);
                    out.push('\n');
                }
                Ok(out)
            }
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(game)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&format!("{:<10} {:<9} EVENT\n", "TS", "SENTIMENT"));
                for entry in &game.entries {
                    out.push_str(&format!(
                        "{:<10} {:<9} {}\n",
                        entry.ts, entry.fan_sentiment, entry.event
                    ));
                }
                if !game.themes.is_empty() {
                    out.push_str(&format!("\nThemes: {}\n", game.themes.join(", ")));
                }
                Ok(out)
            }
        }
    }

    fn count_files(dir: &str) -> usize {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| {
                        e.path()
                            .extension()
                            .map(|ext| ext == "jsonl")
                            .unwrap_or(false)
                    })
                    .count()
            })
            .unwrap_or(0)
    }
}
