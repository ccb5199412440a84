use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use dalseong_books::{run, Config};
use std::env;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // RUST_LOG wins; LOG_LEVEL is the short form for schedulers.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(level.parse::<Level>().unwrap_or(Level::INFO).to_string().to_lowercase())
    });
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure ────────────────────────────────────────────────
    let config = Config::parse();
    info!(
        started = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        cwd = %env::current_dir().map(|p| p.display().to_string()).unwrap_or_default(),
        "Dalseong county library holdings update"
    );

    // ─── 3) run the pipeline ─────────────────────────────────────────
    let report = run(&config).context("writing the output artifact")?;

    if report.is_live() {
        info!(
            books = report.total_count,
            output = %report.output.display(),
            "all done"
        );
    } else {
        warn!(
            books = report.total_count,
            output = %report.output.display(),
            source = %report.source,
            "finished with sample data"
        );
    }
    Ok(())
}
