pub mod builders;
pub mod recording_backend;

use std::io;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use fwatch::logging::LOG_ENV_VAR;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install the process-wide test subscriber once.
///
/// Output goes through the test writer, so it only shows for failing tests.
/// The filter comes from `FWATCH_LOG` (full `EnvFilter` syntax, e.g.
/// `fwatch::engine=trace`) and defaults to debug for this crate only.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("fwatch=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Log output collected by [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Record everything logged on the current thread at `level` or above, in
/// the plain format the CLI writes to a redirected stderr.
///
/// Capture lasts until the returned guard is dropped. Use it from
/// single-threaded `#[tokio::test]`s so the runtime logs on this thread.
pub fn capture_logs(level: tracing::Level) -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let sink = logs.clone();

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}

/// Fail the test if `f` has not finished within five seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("test timed out after 5 seconds")
}
