// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::exec::{UpdateBackend, UpdateCommand, UpdateOutcome};
use crate::fs::FileSystem;
use crate::logging::LOG_TARGET;

use super::core::WatchCore;
use super::{CycleReport, RunSummary, RuntimeEvent, RuntimeOptions};

/// Drives `WatchCore` once per poll interval and runs the update command,
/// through an `UpdateBackend`, on every cycle that found changes.
///
/// Everything happens on one task: scan, compare, update, sleep. Shutdown
/// requests are observed while sleeping or right after an update command,
/// so a command that is already running is allowed to finish first.
pub struct Runtime<B: UpdateBackend> {
    core: WatchCore,
    fs: Arc<dyn FileSystem>,
    update: Option<UpdateCommand>,
    backend: B,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    events_closed: bool,
    /// A shutdown request was taken off the channel outside of a sleep.
    shutdown_pending: bool,
    options: RuntimeOptions,
}

impl<B: UpdateBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("update", &self.update)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: UpdateBackend> Runtime<B> {
    pub fn new(
        core: WatchCore,
        fs: Arc<dyn FileSystem>,
        update: Option<UpdateCommand>,
        backend: B,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            core,
            fs,
            update,
            backend,
            event_rx,
            events_closed: false,
            shutdown_pending: false,
            options,
        }
    }

    /// Main poll loop.
    ///
    /// Returns when a `ShutdownRequested` event arrives or `max_cycles` is
    /// reached. A failing update command is logged and never ends the loop.
    /// Lifecycle messages stay at debug level so an interrupted run prints
    /// nothing beyond the CHANGED/RUNNING/FAILED lines.
    pub async fn run(mut self) -> crate::errors::Result<RunSummary> {
        debug!(
            roots = ?self.core.roots(),
            anchor = ?self.core.matcher().anchor(),
            interval_ms = self.options.poll_interval.as_millis() as u64,
            "fwatch runtime started"
        );

        let mut summary = RunSummary::default();

        loop {
            let report = self.core.poll(self.fs.as_ref());
            summary.cycles += 1;

            self.report_changes(&report);

            if report.has_changes() {
                if let Some(cmd) = &self.update {
                    info!(target: LOG_TARGET, "RUNNING: {}", cmd);
                    let outcome = self.backend.run_update(cmd).await;
                    summary.updates += 1;

                    if !outcome.is_success() {
                        summary.failed_updates += 1;
                    }

                    // Ctrl-C reaches the child too; its exit status is not a
                    // failure worth reporting when we are about to stop.
                    if take_shutdown(&mut self.event_rx, &mut self.events_closed) {
                        debug!(cmd = %cmd, ?outcome, "update interrupted by shutdown");
                        self.shutdown_pending = true;
                    } else {
                        log_outcome(cmd, &outcome);
                    }
                }
            }

            if self
                .options
                .max_cycles
                .is_some_and(|max| summary.cycles >= max)
            {
                debug!(cycles = summary.cycles, "cycle limit reached");
                break;
            }

            if self.sleep_or_shutdown().await {
                debug!("shutdown requested; stopping runtime");
                break;
            }
        }

        debug!(
            cycles = summary.cycles,
            updates = summary.updates,
            "runtime exiting"
        );
        Ok(summary)
    }

    fn report_changes(&self, report: &CycleReport) {
        for path in &report.changed {
            info!(target: LOG_TARGET, "CHANGED: {}", path.display());
        }
    }

    /// Sleep for the poll interval. Returns true if a shutdown was requested
    /// before the interval elapsed.
    async fn sleep_or_shutdown(&mut self) -> bool {
        if self.shutdown_pending {
            return true;
        }

        let sleep = tokio::time::sleep(self.options.poll_interval);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                biased;

                event = self.event_rx.recv(), if !self.events_closed => match event {
                    Some(RuntimeEvent::ShutdownRequested) => return true,
                    None => {
                        // No shutdown source left; keep polling.
                        debug!("runtime event channel closed");
                        self.events_closed = true;
                    }
                },
                _ = &mut sleep => return false,
            }
        }
    }
}

/// Non-blocking check for a shutdown request queued while an update ran.
fn take_shutdown(event_rx: &mut mpsc::Receiver<RuntimeEvent>, events_closed: &mut bool) -> bool {
    if *events_closed {
        return false;
    }
    match event_rx.try_recv() {
        Ok(RuntimeEvent::ShutdownRequested) => true,
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Disconnected) => {
            debug!("runtime event channel closed");
            *events_closed = true;
            false
        }
    }
}

fn log_outcome(cmd: &UpdateCommand, outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::Success => debug!(cmd = %cmd, "update command succeeded"),
        UpdateOutcome::Failed(code) => {
            warn!(target: LOG_TARGET, exit_code = *code, "FAILED: {}", cmd)
        }
        UpdateOutcome::LaunchFailed(reason) => {
            warn!(target: LOG_TARGET, error = %reason, "FAILED: {}", cmd)
        }
    }
}
