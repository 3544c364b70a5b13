use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use captionist_core::{
    CancellationToken, ClientProfile, ExtractionResult, Extractor, ExtractorConfig,
    format_result_readable, format_time, get_cache_dir, get_result_path, is_video_url, load_result,
    normalize, save_result, timestamp_url,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = d.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

/// CLI wrapper for ClientProfile (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProfile {
    #[default]
    Windows,
    Mac,
    Linux,
}

impl From<CliProfile> for ClientProfile {
    fn from(cli: CliProfile) -> Self {
        match cli {
            CliProfile::Windows => ClientProfile::Windows,
            CliProfile::Mac => ClientProfile::Mac,
            CliProfile::Linux => ClientProfile::Linux,
        }
    }
}

#[derive(Parser)]
#[command(name = "captionist")]
#[command(about = "Pull the timestamped transcript and top comments of a YouTube video")]
struct Cli {
    /// Video URL
    url: String,

    /// Print the raw extraction result as JSON
    #[arg(long)]
    json: bool,

    /// Append a link that starts playback at each transcript line
    #[arg(long)]
    links: bool,

    /// Maximum number of comment pages to request
    #[arg(long, default_value_t = 5)]
    max_pages: usize,

    /// Timeout in seconds for the watch page and transcript requests
    #[arg(long, default_value_t = 15.0)]
    timeout: f64,

    /// Timeout in seconds for each comment page
    #[arg(long, default_value_t = 8.0)]
    page_timeout: f64,

    /// Platform base URL
    #[arg(long, env = "CAPTIONIST_BASE_URL", default_value = captionist_core::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Browser identity presented to the platform
    #[arg(short, long, default_value = "windows")]
    profile: CliProfile,

    /// Force re-extraction even if a cached result exists
    #[arg(short, long)]
    force: bool,
}

impl Cli {
    fn extractor_config(&self) -> Result<ExtractorConfig> {
        let mut config = ExtractorConfig::default().with_base_url(&self.base_url);
        config.document_timeout = seconds(self.timeout, "--timeout")?;
        config.transcript_timeout = config.document_timeout;
        config.page_timeout = seconds(self.page_timeout, "--page-timeout")?;
        config.max_comment_pages = self.max_pages;
        config.profile = self.profile.clone().into();
        Ok(config)
    }
}

fn seconds(value: f64, flag: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("{flag} must be a non-negative number of seconds"))
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(spinner_style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CAPTIONIST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Transcript lines with a jump link after each one.
fn format_transcript_links(result: &ExtractionResult) -> Result<String> {
    let mut lines = Vec::with_capacity(result.segments.len());
    for seg in &result.segments {
        let link = timestamp_url(&result.video_url, seg.start_time)?;
        lines.push(format!("[{}] {}\n    {}", seg.formatted_time, seg.text, link));
    }
    Ok(lines.join("\n"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !is_video_url(&cli.url) {
        eprintln!(
            "{} not a recognizable video URL: {}",
            style("Error:").red().bold(),
            cli.url
        );
        std::process::exit(1);
    }

    let config = cli.extractor_config()?;
    let video = normalize(&cli.url);
    let video_id = video.video_id.clone().unwrap_or_default();
    let result_path = get_result_path(&get_cache_dir(&video_id), &config);

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("captionist").cyan().bold(),
            style("Transcript & Comments").dim()
        );
        println!("{}", style("─".repeat(60)).dim());
    }

    let total_start = Instant::now();

    let cached = if !cli.force && result_path.exists() {
        match load_result(&result_path).await {
            Ok(result) => Some(result),
            Err(e) => {
                debug!(error = %e, path = %result_path.display(), "ignoring unreadable cache entry");
                None
            }
        }
    } else {
        None
    };

    let (result, stored) = match cached {
        Some(result) => {
            if !cli.json {
                println!(
                    "{} Extracted: {} segments, {} comments {}",
                    style("✓").green().bold(),
                    result.segments.len(),
                    result.comments.len(),
                    style("(cached)").dim()
                );
            }
            (result, true)
        }
        None => {
            let extractor = Extractor::new(config)?;
            let cancel = CancellationToken::new();

            let watcher = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    watcher.cancel();
                }
            });

            let spinner =
                (!cli.json).then(|| create_spinner("Extracting transcript and comments..."));
            let report = extractor
                .extract_report(&video.normalized_url, &cancel)
                .await;
            let complete = report.is_complete();
            let result = report.result;

            if report.cancelled {
                if let Some(spinner) = spinner {
                    spinner.finish_with_message(format!(
                        "{} Interrupted: {} segments, {} comments {}",
                        style("!").yellow().bold(),
                        result.segments.len(),
                        result.comments.len(),
                        style("(partial, not cached)").dim()
                    ));
                }
            } else if !report.page_loaded {
                if let Some(spinner) = spinner {
                    spinner.finish_with_message(format!(
                        "{} Video page unreachable {}",
                        style("✗").red().bold(),
                        style("(not cached)").dim()
                    ));
                }
            } else {
                save_result(&result, &result_path).await?;
                if let Some(spinner) = spinner {
                    spinner.finish_with_message(format!(
                        "{} Extracted: {} segments ({}), {} comments {}",
                        style("✓").green().bold(),
                        result.segments.len(),
                        style(format_time(result.transcript_duration())).yellow(),
                        result.comments.len(),
                        style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
                    ));
                }
            }
            (result, complete)
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "\n{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );
    if stored {
        println!(
            "{} {}\n",
            style("Saved:").dim(),
            style(result_path.display()).cyan()
        );
    }
    println!("{}", style("─".repeat(60)).dim());

    println!("{}", format_result_readable(&result));

    if cli.links && !result.segments.is_empty() {
        println!("## Links\n");
        println!("{}", format_transcript_links(&result)?);
    }

    Ok(())
}
