use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use fwatch::exec::{UpdateBackend, UpdateCommand, UpdateOutcome};

type Hook = Box<dyn FnMut(usize) + Send>;

/// A fake update backend that:
/// - records the raw command of every invocation
/// - returns scripted outcomes (then `Success` once the script runs out)
/// - optionally runs a hook after each invocation, e.g. to touch files in a
///   mock filesystem so the next cycle sees a change.
pub struct RecordingBackend {
    invocations: Arc<Mutex<Vec<String>>>,
    outcomes: VecDeque<UpdateOutcome>,
    hook: Option<Hook>,
}

impl RecordingBackend {
    pub fn new(invocations: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            invocations,
            outcomes: VecDeque::new(),
            hook: None,
        }
    }

    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = UpdateOutcome>) -> Self {
        self.outcomes.extend(outcomes);
        self
    }

    /// Run `hook(n)` after the n-th invocation (1-based).
    pub fn on_run(mut self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl UpdateBackend for RecordingBackend {
    fn run_update<'a>(
        &'a mut self,
        command: &'a UpdateCommand,
    ) -> Pin<Box<dyn Future<Output = UpdateOutcome> + Send + 'a>> {
        Box::pin(async move {
            let count = {
                let mut guard = self.invocations.lock().unwrap();
                guard.push(command.raw().to_string());
                guard.len()
            };

            if let Some(hook) = self.hook.as_mut() {
                hook(count);
            }

            self.outcomes.pop_front().unwrap_or(UpdateOutcome::Success)
        })
    }
}
