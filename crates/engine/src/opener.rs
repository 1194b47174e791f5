use std::{path::Path, sync::Mutex};

use anyhow::{anyhow, Context};
use tracing::info;
use url::Url;

/// Opens URLs with whatever the desktop associates with them.
pub trait Opener: Send + Sync {
    fn open_url(&self, url: &Url) -> anyhow::Result<()>;
}

/// Opener that only logs and records requests. Used for dry runs.
#[derive(Debug, Default)]
pub struct LoggingOpener {
    opened: Mutex<Vec<Url>>,
}

impl LoggingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<Url> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }
}

impl Opener for LoggingOpener {
    fn open_url(&self, url: &Url) -> anyhow::Result<()> {
        info!(%url, "open requested");
        self.opened
            .lock()
            .map_err(|_| anyhow!("opener state poisoned"))?
            .push(url.clone());
        Ok(())
    }
}

/// `file://` URL for a filesystem location, with Windows separators normalised.
pub fn file_url(path: &Path) -> anyhow::Result<Url> {
    if let Ok(url) = Url::from_file_path(path) {
        return Ok(url);
    }

    let normalized = path.to_string_lossy().replace('\\', "/");
    let raw = if normalized.starts_with('/') {
        format!("file://{normalized}")
    } else {
        format!("file:///{normalized}")
    };
    Url::parse(&raw).with_context(|| format!("invalid filesystem location '{}'", path.display()))
}
