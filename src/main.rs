mod api;
mod server;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use post_score::config::ScoringConfig;
use post_score::scoring::{calculate_content_quality_score, PostingWindow};
use post_score::{
    evaluate_checked, format_float, format_percent, MediaType, PostInsights, PostMetrics,
    ScoreResult,
};

#[derive(Parser)]
#[command(name = "post-score", about = "Instagram/Threads post performance scorer")]
struct Cli {
    /// Path to a TOML scoring config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a post from its engagement metrics.
    Score(ScoreArgs),
    /// Derive metrics from raw post insights, then score them.
    Analyze(AnalyzeArgs),
    /// Compute the 0-5 content quality score.
    Quality(QualityArgs),
    /// Check whether a timestamp falls in an engagement window.
    Timing(TimingArgs),
    /// Run the HTTP scoring service.
    Serve(ServeArgs),
    /// Write the default config to disk.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    /// Read a PostMetrics JSON object from stdin instead of flags.
    #[arg(long)]
    json: bool,
    #[arg(long, default_value_t = 0)]
    saves: u32,
    #[arg(long, default_value_t = 0)]
    shares: u32,
    #[arg(long, default_value_t = 0.0)]
    engagement_rate: f64,
    #[arg(long, default_value_t = 0)]
    hashtags: u32,
    #[arg(long)]
    optimal_time: bool,
    #[arg(long, default_value_t = 0)]
    quality: u8,
    #[arg(long)]
    video_completion: Option<f64>,
    #[arg(long, default_value_t = 0)]
    caption_length: u32,
    #[arg(long)]
    cta: bool,
    #[arg(long, default_value = "image")]
    media: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Caption text; read from stdin when omitted.
    #[arg(long)]
    caption: Option<String>,
    #[arg(long, default_value = "image")]
    media: String,
    #[arg(long)]
    timestamp: String,
    #[arg(long, default_value_t = 0)]
    likes: u64,
    #[arg(long, default_value_t = 0)]
    comments: u64,
    #[arg(long, default_value_t = 0)]
    saves: u32,
    #[arg(long, default_value_t = 0)]
    shares: u32,
    #[arg(long, default_value_t = 0)]
    reach: u64,
    #[arg(long)]
    video_completion: Option<f64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
struct QualityArgs {
    #[arg(long, default_value_t = 0)]
    caption_length: u32,
    #[arg(long, default_value_t = 0)]
    hashtags: u32,
    #[arg(long, default_value = "image")]
    media: String,
    #[arg(long)]
    cta: bool,
}

#[derive(Args, Debug, Clone)]
struct TimingArgs {
    timestamp: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/scoring.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig(args) = &cli.command {
        return init_config(args);
    }

    let (config, config_path) = ScoringConfig::load(cli.config.clone())?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::info!(path = %path.display(), "using scoring config");
    }

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Quality(args) => run_quality(args),
        Command::Timing(args) => run_timing(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
        Command::InitConfig(_) => Ok(()),
    }
}

fn run_score(args: ScoreArgs, config: &ScoringConfig) -> anyhow::Result<()> {
    let metrics = if args.json {
        let raw = read_stdin()?;
        serde_json::from_str::<PostMetrics>(&raw).context("invalid PostMetrics JSON")?
    } else {
        PostMetrics {
            saves: args.saves,
            shares: args.shares,
            engagement_rate: args.engagement_rate,
            hashtag_count: args.hashtags,
            is_optimal_time: args.optimal_time,
            content_quality_score: args.quality,
            video_completion_rate: args.video_completion,
            caption_length: args.caption_length,
            has_call_to_action: args.cta,
            media_type: MediaType::parse(&args.media)?,
        }
    };

    let result = evaluate_checked(&metrics, config)?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(&result),
    }
    Ok(())
}

fn run_analyze(args: AnalyzeArgs, config: &ScoringConfig) -> anyhow::Result<()> {
    let caption = match args.caption {
        Some(caption) => caption,
        None => read_stdin()?,
    };

    let insights = PostInsights {
        caption,
        media_type: MediaType::parse(&args.media)?,
        timestamp: args.timestamp,
        likes: args.likes,
        comments: args.comments,
        saves: args.saves,
        shares: args.shares,
        reach: args.reach,
        video_completion_rate: args.video_completion,
    };
    let metrics = insights.to_metrics(config)?;
    let result = evaluate_checked(&metrics, config)?;

    match args.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({ "metrics": metrics, "result": result });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            println!(
                "Derived metrics: engagement {} | caption {} chars | hashtags {} | CTA {} | optimal time {} | quality {}/5",
                format_percent(metrics.engagement_rate),
                metrics.caption_length,
                metrics.hashtag_count,
                yes_no(metrics.has_call_to_action),
                yes_no(metrics.is_optimal_time),
                metrics.content_quality_score
            );
            print_result(&result);
        }
    }
    Ok(())
}

fn run_quality(args: QualityArgs) -> anyhow::Result<()> {
    let media = MediaType::parse(&args.media)?;
    let score = calculate_content_quality_score(args.caption_length, args.hashtags, media, args.cta);
    println!("Content quality: {}/5", score);
    Ok(())
}

fn run_timing(args: TimingArgs, config: &ScoringConfig) -> anyhow::Result<()> {
    println!("{}", timing_line(config, &args.timestamp)?);
    Ok(())
}

fn timing_line(config: &ScoringConfig, timestamp: &str) -> anyhow::Result<String> {
    let hour = config.timing.hour_of(timestamp)?;
    let window = config.timing.window(hour);
    Ok(format!(
        "Hour {:02} (UTC{:+}m): {} window, optimal: {}",
        hour,
        config.timing.utc_offset_minutes,
        window.label(),
        yes_no(window != PostingWindow::Off)
    ))
}

fn init_config(args: &InitConfigArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists; pass --force to overwrite", args.path.display());
    }
    ScoringConfig::default().write(&args.path)?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

fn print_result(result: &ScoreResult) {
    println!("Algorithm score: {} ({})", result.score, result.level.name);
    println!("{}", result.level.description);

    let breakdown = &result.breakdown;
    println!(
        "Breakdown: saves {} | shares {} | engagement {} | hashtags {} | timing {} | quality {}",
        format_float(breakdown.saves, 1),
        format_float(breakdown.shares, 1),
        format_float(breakdown.engagement_rate, 1),
        format_float(breakdown.hashtags, 1),
        format_float(breakdown.timing, 1),
        format_float(breakdown.content_quality, 1)
    );
    println!(
        "           video {} | caption {} | CTA {} | media {} | raw total {}",
        format_float(breakdown.video_completion, 1),
        format_float(breakdown.caption, 1),
        format_float(breakdown.call_to_action, 1),
        format_float(breakdown.media_type, 1),
        format_float(breakdown.raw_total, 1)
    );

    if !result.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &result.suggestions {
            println!(
                "- [{}] {}: {}",
                suggestion.priority.label(),
                suggestion.message,
                suggestion.suggestion
            );
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed reading stdin")?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        bail!("nothing on stdin");
    }
    Ok(trimmed.to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_score=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
