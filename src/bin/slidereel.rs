use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, prelude::*};

use slidereel::{
    AppConfig, AssetPipeline, CancelFlag, Fps, FrameEvaluator, FrameIndex, NarrationSynthesizer,
    PrepareProgress, Project, Timeline,
    services::{FsMediaStore, HttpNarrationClient, JsonProjectStore, NoNarration},
};

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the compiled frame schedule as JSON.
    Timeline(TimelineArgs),
    /// Print the evaluated state of one frame as JSON.
    Frame(FrameArgs),
    /// Synthesize missing narration and persist inline media, rewriting the project file.
    Prepare(PrepareArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second (defaults to SLIDEREEL_FPS or 30).
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Absolute frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Frames per second (defaults to SLIDEREEL_FPS or 30).
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct PrepareArgs {
    /// Project JSON, updated in place.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Narration voice (defaults to SLIDEREEL_VOICE or "alloy").
    #[arg(long)]
    voice: Option<String>,

    /// Directory durable media is written under (defaults to SLIDEREEL_PUBLIC_DIR).
    #[arg(long)]
    public_dir: Option<PathBuf>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineReport<'a> {
    fps: Fps,
    total_frames: u64,
    duration_secs: f64,
    entries: &'a [slidereel::TimelineEntry],
    audio_cues: Vec<slidereel::AudioCue>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_new(&log_level)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("build log filter")?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();

    let config = AppConfig::from_env().context("read SLIDEREEL_* configuration")?;
    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args, &config).await,
        Command::Frame(args) => cmd_frame(args, &config).await,
        Command::Prepare(args) => cmd_prepare(args, config).await,
    }
}

async fn read_project(path: &std::path::Path) -> anyhow::Result<Project> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("open project '{}'", path.display()))?;
    let project: Project = serde_json::from_slice(&raw).context("parse project JSON")?;
    project.validate()?;
    Ok(project)
}

fn resolve_fps(flag: Option<u32>, config: &AppConfig) -> anyhow::Result<Fps> {
    match flag {
        Some(num) => Ok(Fps::new(num, 1)?),
        None => Ok(config.fps),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_timeline(args: TimelineArgs, config: &AppConfig) -> anyhow::Result<()> {
    let project = read_project(&args.in_path).await?;
    let timeline = Timeline::compile(&project.scenes, resolve_fps(args.fps, config)?);
    print_json(&TimelineReport {
        fps: timeline.fps,
        total_frames: timeline.total_frames(),
        duration_secs: timeline.duration_secs(),
        entries: &timeline.entries,
        audio_cues: timeline.audio_cues(&project.scenes),
    })
}

async fn cmd_frame(args: FrameArgs, config: &AppConfig) -> anyhow::Result<()> {
    let project = read_project(&args.in_path).await?;
    let fps = resolve_fps(args.fps, config)?;
    let timeline = Timeline::compile(&project.scenes, fps);
    let playback = slidereel::PlaybackConfig {
        fps,
        ..config.playback()
    };
    let frame = FrameEvaluator::eval_frame(&project, &timeline, FrameIndex(args.frame), &playback)?
        .with_context(|| {
            format!(
                "frame {} is past the end of the timeline ({} frames)",
                args.frame,
                timeline.total_frames()
            )
        })?;
    print_json(&frame)
}

async fn cmd_prepare(args: PrepareArgs, config: AppConfig) -> anyhow::Result<()> {
    let project = read_project(&args.in_path).await?;
    let voice = args.voice.unwrap_or(config.voice);
    let public_dir = args.public_dir.unwrap_or(config.public_dir);

    let narrator: Arc<dyn NarrationSynthesizer> = match config.tts_url {
        Some(url) => Arc::new(HttpNarrationClient::new(url, config.tts_api_key)),
        None => {
            tracing::warn!("SLIDEREEL_TTS_URL not set, scenes without audio stay silent");
            Arc::new(NoNarration)
        }
    };
    let store = Arc::new(JsonProjectStore::new(&args.in_path));
    let pipeline = AssetPipeline::new(
        store.clone(),
        narrator,
        Arc::new(FsMediaStore::new(&public_dir)),
    );

    let cancel = CancelFlag::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current step");
            on_ctrl_c.cancel();
        }
    });

    let sink = |p: &PrepareProgress| {
        eprintln!(
            "[{}/{}] {:?}: {}",
            p.completed, p.total, p.status, p.current_task
        );
    };
    let scenes = pipeline
        .prepare(&project.id, project.scenes, &voice, &sink, &cancel)
        .await
        .context("prepare assets")?;

    let missing = scenes
        .iter()
        .filter(|s| s.has_narration() && s.playback_audio().is_none())
        .count();
    if missing > 0 {
        tracing::warn!(missing, "some narrated scenes still have no audio");
    }
    eprintln!("updated {}", store.path().display());
    Ok(())
}
