mod curriculum_file;
mod headless;
mod intent;
mod render;

use clap::Parser;
use curriculum_file::load_curriculum;
use headless::HeadlessMedia;
use intent::Intent;
use lectern_common::{Curriculum, Position};
use lectern_core::player::{LessonPlayerHandle, LessonPlayerService, PlayerProgress};
use lectern_core::PlayerConfig;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

/// lectern: drive the lesson player from the terminal, one command per line.
#[derive(Parser)]
#[command(name = "lectern")]
struct Args {
    /// Curriculum file (.json, .yaml or .yml).
    #[arg(long, env = "LECTERN_CURRICULUM")]
    curriculum: PathBuf,

    /// Section to open, as it would appear in a route. Invalid values fall back to 0.
    #[arg(long)]
    section: Option<String>,

    /// Lecture to open within the section. Invalid values fall back to 0.
    #[arg(long)]
    lecture: Option<String>,

    /// YAML player config.
    #[arg(long, env = "LECTERN_CONFIG")]
    config: Option<PathBuf>,

    /// Refuse every fullscreen request, like a platform without fullscreen support.
    #[arg(long)]
    deny_fullscreen: bool,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();
    configure_logging();
    let args = Args::parse();

    info!("lectern starting");

    let curriculum = load_curriculum(&args.curriculum).unwrap_or_else(|e| {
        error!("Failed to load curriculum {}: {e}", args.curriculum.display());
        std::process::exit(1);
    });

    let config = match &args.config {
        Some(path) => PlayerConfig::load(path).unwrap_or_else(|e| {
            error!("Failed to load config {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => PlayerConfig::default(),
    }
    .apply_env_overrides();
    debug!("Player config: {:?}", config);

    let initial = Position::from_route_params(args.section.as_deref(), args.lecture.as_deref());
    let handle = LessonPlayerService::start(
        curriculum.clone(),
        initial,
        Box::new(HeadlessMedia::new(args.deny_fullscreen)),
        config,
        tokio::runtime::Handle::current(),
    );
    let mut progress_rx = handle.subscribe_progress();

    if !print_view(&handle, &curriculum, &mut progress_rx).await {
        std::process::exit(1);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {e}");
                break;
            }
        };
        let intent = match intent::parse(&line) {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match intent {
            Intent::Quit => break,
            Intent::Help => {
                println!("{}", intent::HELP);
                continue;
            }
            intent => apply(&handle, intent).await,
        }
        if !print_view(&handle, &curriculum, &mut progress_rx).await {
            break;
        }
    }

    handle.shutdown();
    info!("lectern exiting");
}

async fn apply(handle: &LessonPlayerHandle, intent: Intent) {
    match intent {
        Intent::Next => handle.go_next(),
        Intent::Prev => handle.go_prev(),
        Intent::Select { section, lecture } => {
            // Refusal is also broadcast and printed as a notice
            if let Err(e) = handle.select_lecture(section, lecture).await {
                debug!("Selection refused: {e}");
            }
        }
        Intent::ToggleSection(section) => handle.toggle_expanded_section(section),
        Intent::Play => handle.play(),
        Intent::Pause => handle.pause(),
        Intent::Seek(seconds) => handle.seek(seconds),
        Intent::Volume(volume) => handle.set_volume(volume),
        Intent::Mute => handle.toggle_mute(),
        Intent::Fullscreen => handle.toggle_fullscreen(),
        Intent::FullscreenChange(is_fullscreen) => handle.on_fullscreen_change(is_fullscreen),
        Intent::TimeUpdate(seconds) => handle.on_time_update(seconds),
        Intent::MetadataLoaded(seconds) => handle.on_metadata_loaded(seconds),
        Intent::Ended => handle.on_ended(),
        Intent::Activity => handle.on_activity(),
        Intent::PointerLeave => handle.on_pointer_leave(),
        Intent::Show | Intent::Help | Intent::Quit => {}
    }
}

/// Print pending notices followed by the current view. Returns false once
/// the player has stopped.
async fn print_view(
    handle: &LessonPlayerHandle,
    curriculum: &Curriculum,
    progress_rx: &mut UnboundedReceiver<PlayerProgress>,
) -> bool {
    // The snapshot reply comes after every earlier command, so their events
    // are already queued
    let snapshot = match handle.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("{e}");
            return false;
        }
    };
    while let Ok(progress) = progress_rx.try_recv() {
        debug!("Player progress: {:?}", progress);
        if let Some(notice) = render::notice(&progress) {
            println!("* {notice}");
        }
    }
    println!("{}\n", render::player_view(curriculum, &snapshot));
    true
}
