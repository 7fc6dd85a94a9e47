use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, error, info};
use std::process::ExitCode;

use lyricsync::config;
use lyricsync::data::TrackOutcome;
use lyricsync::helpers::lrclib::{self, LrclibClient};
use lyricsync::helpers::songstore::SongStore;
use lyricsync::helpers::{http_client, ratelimit};
use lyricsync::reconciler::Reconciler;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Verify local lyric transcripts against LRCLIB", long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[clap(long, short = 'c', default_value = "lyricsync.json")]
    config: String,

    /// Content directory holding the lyric markdown files
    #[clap(long)]
    content_dir: Option<String>,

    /// Artist name used for LRCLIB searches
    #[clap(long)]
    artist: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify every track in the catalog and print a report
    ///
    /// Example: lyricsync verify-all --content-dir content/lyrics
    VerifyAll,
    /// Verify a single track
    ///
    /// Example: lyricsync verify --slug ready-or-not
    Verify {
        /// Track slug (record file name without extension)
        #[clap(long, short = 's')]
        slug: String,
    },
    /// Print the parsed record for a track
    ///
    /// Example: lyricsync show --slug ready-or-not
    Show {
        /// Track slug (record file name without extension)
        #[clap(long, short = 's')]
        slug: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    // The config file is optional; command line flags take precedence
    let config = match config::load_config(&args.config) {
        Ok(value) => value,
        Err(e) => {
            debug!("No usable config file ({}), using defaults", e);
            serde_json::json!({})
        }
    };

    let content_dir = args
        .content_dir
        .clone()
        .or_else(|| {
            config
                .get("content_dir")
                .and_then(|v| v.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| "content/lyrics".to_string());

    let artist = args
        .artist
        .clone()
        .or_else(|| {
            config
                .get("artist")
                .and_then(|v| v.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| "Wookiefoot".to_string());

    let lrclib_config = config::get_service_config(&config, "lrclib");
    let enabled = lrclib_config
        .and_then(|c| c.get("enable"))
        .and_then(|v| v.as_bool())
        .unwrap_or(true);
    if !enabled {
        error!("LRCLIB lookups are disabled in the configuration");
        return ExitCode::FAILURE;
    }

    let base_url = lrclib_config
        .and_then(|c| c.get("base_url"))
        .and_then(|v| v.as_str())
        .unwrap_or(lrclib::DEFAULT_BASE_URL);
    let rate_limit_ms = lrclib_config
        .and_then(|c| c.get("rate_limit_ms"))
        .and_then(|v| v.as_u64())
        .unwrap_or(1000);

    ratelimit::register_service(lrclib::RATELIMIT_SERVICE, rate_limit_ms);
    info!("LRCLIB rate limit set to {} ms", rate_limit_ms);

    let client = LrclibClient::with_base_url(http_client::new_http_client(10), base_url);
    let store = SongStore::new(content_dir.as_str());
    let reconciler = Reconciler::new(client, store.clone(), &artist);

    match args.command {
        Commands::VerifyAll => {
            info!("Verifying all tracks under {}", content_dir);
            match reconciler.generate_report() {
                Ok(report) => {
                    println!("{}", report);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Batch verification failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Verify { slug } => match reconciler.verify_slug(&slug) {
            Ok(TrackOutcome::Verified) => {
                println!("{}: verified", slug);
                ExitCode::SUCCESS
            }
            Ok(TrackOutcome::NoMatch) => {
                println!("{}: no match", slug);
                ExitCode::FAILURE
            }
            Ok(TrackOutcome::Failed(reason)) => {
                println!("{}: failed ({})", slug, reason);
                ExitCode::FAILURE
            }
            Err(e) => {
                error!("Could not load track '{}': {}", slug, e);
                ExitCode::FAILURE
            }
        },
        Commands::Show { slug } => match store.load_by_slug(&slug) {
            Ok(track) => match serde_json::to_string_pretty(&track) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Failed to serialize track '{}': {}", slug, e);
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                error!("Could not load track '{}': {}", slug, e);
                ExitCode::FAILURE
            }
        },
    }
}
