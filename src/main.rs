use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pockettube::config::{Settings, SettingsStore};
use pockettube::locale::StringTable;
use pockettube::scene::settings::SettingsScene;
use pockettube::scene::{NavigationIntent, Scene};
use pockettube::services::SceneServices;
use pockettube::shell::{
    setup_terminal, DemoErrorOverlay, DemoHelpOverlay, DemoOverlayMenu, DemoPlayback,
    LoggingContentSink, LoggingDisplayControl, NullThumbnails, TermHid, TermSurface,
};
use pockettube::ui::DiagnosticLog;

#[derive(Parser)]
#[command(name = "pockettube", about = "Settings scene demo shell")]
struct Cli {
    /// Settings file path; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append tracing output to this file instead of discarding it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frame rate of the demo loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }

    let (terminal, guard) = setup_terminal()?;

    let strings = StringTable::new();
    let log = DiagnosticLog::new();
    let playback = DemoPlayback::new(strings.clone());
    let help = DemoHelpOverlay::new();
    let error = DemoErrorOverlay::new();

    let services = SceneServices {
        input: Box::new(TermHid::new(playback.clone(), help.clone(), error.clone())),
        surface: Box::new(TermSurface::new(terminal, cli.fps)),
        display: Arc::new(LoggingDisplayControl),
        playback: Box::new(playback),
        overlay_menu: Box::new(DemoOverlayMenu::new()),
        help: Box::new(help),
        error: Box::new(error),
        thumbnails: Arc::new(NullThumbnails),
        content_language: Arc::new(LoggingContentSink),
    };

    let path = cli.config.unwrap_or_else(Settings::default_path);
    let store = SettingsStore::new(Settings::default(), path);
    let mut scene = SettingsScene::new(services, store, strings, log.clone());

    scene.init();
    let frame = Duration::from_millis(1000 / u64::from(cli.fps.max(1)));
    loop {
        let started = Instant::now();
        match scene.draw() {
            NavigationIntent::Back => break,
            NavigationIntent::To(id) => log.push(format!("navigate: {id:?}")),
            NavigationIntent::None => {}
        }
        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    scene.exit();

    drop(guard);
    Ok(())
}
