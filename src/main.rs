mod align;
mod config;
mod lyrics;
mod netease;
mod storage;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use crate::align::{Alignment, AlignmentPipeline, CancelFlag, CandidateSelector, Mode, Query};
use crate::netease::NeteaseClient;
use crate::storage::LyricStore;

#[derive(Debug, Parser)]
#[command(name = "lrc-align", version, about = "Find synchronized bilingual lyrics for a song")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the local lyric directory.
    #[arg(long)]
    lrc_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the best matching lyrics (local file first, then NetEase).
    Lyrics {
        #[command(flatten)]
        query: QueryArgs,
        /// Skip the local lyric directory.
        #[arg(long)]
        no_cache: bool,
    },
    /// Print every accepted candidate, best first.
    Rank {
        #[command(flatten)]
        query: QueryArgs,
        /// Print results as JSON, merged lyrics included.
        #[arg(long)]
        json: bool,
    },
    /// Save confirmed lyrics as an .lrc next to a media file.
    Confirm {
        /// Media file path; its extension is replaced by `.lrc`.
        #[arg(long)]
        path: std::path::PathBuf,
        /// Read lyrics from this file instead of stdin.
        #[arg(long)]
        lyrics: Option<std::path::PathBuf>,
    },
    /// Store the local lyric directory in the config file.
    SetLrcDir { dir: std::path::PathBuf },
}

#[derive(Debug, Args)]
struct QueryArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    artist: String,
    #[arg(long, default_value = "")]
    album: String,
    /// Track length in seconds; 0 disables duration filtering.
    #[arg(long, default_value_t = 0.0, value_parser = parse_duration)]
    duration: f64,
}

fn parse_duration(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err("duration must be a finite, non-negative number of seconds".to_string());
    }
    Ok(secs)
}

impl From<QueryArgs> for Query {
    fn from(args: QueryArgs) -> Self {
        Self {
            title: args.title,
            artist: args.artist,
            album: args.album,
            duration_secs: args.duration,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load(cli.config.as_deref()).context("load config")?;
    if let Some(dir) = cli.lrc_dir {
        cfg.paths.lrc_dir = dir;
    }
    let store = LyricStore::new(cfg.paths.lrc_dir.clone());

    match cli.command {
        Command::Lyrics { query, no_cache } => {
            let query = Query::from(query);
            if !no_cache
                && let Some(local) = store.lookup(&query.title)?
            {
                print!("{local}");
                return Ok(());
            }

            match run_pipeline(&cfg, &query, Mode::BestOnly).await? {
                Alignment::Best(lyrics) => println!("{lyrics}"),
                _ => anyhow::bail!("no lyrics found"),
            }
        }
        Command::Rank { query, json } => {
            let query = Query::from(query);
            let Alignment::Ranked(results) = run_pipeline(&cfg, &query, Mode::RankAll).await? else {
                anyhow::bail!("no lyrics found");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (i, r) in results.iter().enumerate() {
                    println!(
                        "{:02}. {:.3}  {} - {} [{}]  (id={}, {:.0}s)",
                        i + 1,
                        r.score,
                        r.song.name,
                        r.song.artists,
                        r.song.album,
                        r.song.id,
                        r.song.duration_secs
                    );
                }
            }
        }
        Command::Confirm { path, lyrics } => {
            let text = match lyrics {
                Some(file) => std::fs::read_to_string(&file)
                    .with_context(|| format!("read {}", file.display()))?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buf)
                        .await
                        .context("read lyrics from stdin")?;
                    buf
                }
            };
            let written = store.save_confirmed(&path, &text)?;
            println!("Lyrics saved to {}", written.display());
        }
        Command::SetLrcDir { dir } => {
            cfg.paths.lrc_dir = dir;
            config::save(&cfg, cli.config.as_deref()).context("save config")?;
            println!("Updated lrc directory in config.");
        }
    }

    Ok(())
}

async fn run_pipeline(
    cfg: &config::Config,
    query: &Query,
    mode: Mode,
) -> anyhow::Result<Alignment> {
    let client = NeteaseClient::new(&cfg.netease)?;
    let selector = CandidateSelector::new(cfg.selector_config());
    let pipeline = AlignmentPipeline::new(client.clone(), client, selector);

    // Ctrl-C stops the run after the keyword currently in flight.
    let cancel = CancelFlag::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, finishing current keyword");
                cancel.cancel();
            }
        })
    };

    let result = pipeline.align_until(query, mode, &cancel).await;
    watcher.abort();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn rank_args(duration: &str) -> Vec<String> {
        ["lrc-align", "rank", "--title", "Song", "--artist", "Artist", duration]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_duration_accepts_seconds() {
        let cli = Cli::try_parse_from(rank_args("--duration=201.5")).unwrap();
        let Command::Rank { query, .. } = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(query.duration, 201.5);
    }

    #[test]
    fn test_duration_rejects_nan_and_negative() {
        for bad in ["--duration=nan", "--duration=inf", "--duration=-5", "--duration=abc"] {
            assert!(Cli::try_parse_from(rank_args(bad)).is_err(), "{bad}");
        }
    }
}
