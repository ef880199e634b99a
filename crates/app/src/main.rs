use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context as _;
use booklog_application::AppContext;
use booklog_core::Settings;
use booklog_ui::Ui;
use directories::ProjectDirs;

mod config;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("dev", "booklog", "booklog").context("resolve project dirs")?;

    let settings = config::load_settings(&project_dirs.config_dir().join(config::SETTINGS_FILE))?;
    init_logging(project_dirs.data_local_dir(), &settings)?;

    let mut ctx = AppContext::new(settings);
    if ctx.settings.seed_samples {
        ctx.seed_samples();
    }

    let mut ui = Ui::new(ctx);
    ui.run()
}

fn init_logging(log_dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;
    let log_path = log_dir.join("booklog.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let level = settings
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))?;
    Ok(())
}
