// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{RawSettings, WatchSettings};
use crate::errors::{FwatchError, Result};
use crate::exec::UpdateCommand;

impl TryFrom<RawSettings> for WatchSettings {
    type Error = FwatchError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        ensure_has_paths(&raw)?;
        validate_poll_rate(&raw)?;
        let on_update = raw.on_update.map(UpdateCommand::parse).transpose()?;

        Ok(WatchSettings::new_unchecked(
            raw.paths,
            Duration::from_millis(raw.poll_rate_ms),
            on_update,
            raw.gitignore,
        ))
    }
}

fn ensure_has_paths(raw: &RawSettings) -> Result<()> {
    if raw.paths.is_empty() {
        return Err(FwatchError::config(
            "at least one path to watch is required",
        ));
    }
    Ok(())
}

fn validate_poll_rate(raw: &RawSettings) -> Result<()> {
    if raw.poll_rate_ms == 0 {
        return Err(FwatchError::config("poll rate must be >= 1 ms (got 0)"));
    }
    Ok(())
}
