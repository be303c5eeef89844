// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{resolve_settings, WatchSettings};
use crate::engine::{Runtime, RuntimeEvent, RuntimeOptions, WatchCore};
use crate::errors::Result;
use crate::exec::ProcessBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{collect_files, resolve_roots, IgnoreMatcher, BUILTIN_IGNORES};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (CLI + optional config file)
/// - ignore rules and startup path checks
/// - the poll loop with the process backend
/// - Ctrl-C handling
///
/// Every configuration problem is reported before the first scan. Ctrl-C
/// ends the loop and returns `Ok(())`.
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let matcher = IgnoreMatcher::new(
        fs.as_ref(),
        BUILTIN_IGNORES,
        settings.gitignore().map(|p| p.as_path()),
    )?;
    resolve_roots(fs.as_ref(), settings.paths())?;

    if args.dry_run {
        print_dry_run(&settings, &matcher, fs.as_ref());
        return Ok(());
    }

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(4);

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }
    drop(rt_tx);
    // Let the listener install its handler before the first scan.
    tokio::task::yield_now().await;

    let options = RuntimeOptions {
        poll_interval: settings.poll_interval(),
        max_cycles: args.once.then_some(1),
    };

    let core = WatchCore::new(settings.paths().to_vec(), matcher);
    let runtime = Runtime::new(
        core,
        fs,
        settings.on_update().cloned(),
        ProcessBackend::new(),
        rt_rx,
        options,
    );

    let summary = runtime.run().await?;
    debug!(?summary, "poll loop finished");
    Ok(())
}

/// Simple dry-run output: print the effective settings and the files the
/// first scan would pick up.
fn print_dry_run(settings: &WatchSettings, matcher: &IgnoreMatcher, fs: &dyn FileSystem) {
    println!("fwatch dry-run");
    println!("  poll_rate_ms = {}", settings.poll_interval().as_millis());
    match settings.on_update() {
        Some(cmd) => println!("  on_update = {:?}", cmd.argv()),
        None => println!("  on_update = (none)"),
    }
    if let Some(path) = settings.gitignore() {
        println!("  gitignore = {}", path.display());
    }
    println!();

    let files = collect_files(fs, settings.paths(), matcher);
    println!("files ({}):", files.len());
    for file in &files {
        println!("  - {}", file.display());
    }

    info!("dry-run complete (no execution)");
}
