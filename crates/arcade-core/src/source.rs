use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::config::{Config, expand_tilde};
use crate::event::Event;

#[tracing::instrument(skip(cfg, override_path))]
pub fn resolve_events_path(cfg: &Config, override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }

    let configured = cfg
        .get("events.file")
        .unwrap_or_else(|| "~/.arcade/events.json".to_string());
    expand_tilde(Path::new(&configured))
}

#[tracing::instrument(skip(path))]
pub fn load_events(path: &Path) -> anyhow::Result<Vec<Event>> {
    debug!(file = %path.display(), "loading event catalogue");
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {}", path.display()))?;

    debug!(count = events.len(), "loaded events");
    Ok(events)
}

pub fn load_events_or_empty(path: &Path) -> Vec<Event> {
    match load_events(path) {
        Ok(events) => events,
        Err(err) => {
            warn!(
                file = %path.display(),
                error = %err,
                "failed to load event catalogue; continuing with an empty one"
            );
            vec![]
        }
    }
}
