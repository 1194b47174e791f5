use std::{fmt, path::PathBuf};

use url::Url;

/// Execution context the menu is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuContext {
    label: String,
    site_url: Url,
    filesystem_locations: Vec<PathBuf>,
}

impl MenuContext {
    pub fn new(label: impl Into<String>, site_url: Url) -> Self {
        Self {
            label: label.into(),
            site_url,
            filesystem_locations: Vec::new(),
        }
    }

    pub fn with_filesystem_locations(
        mut self,
        locations: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.filesystem_locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    pub fn filesystem_locations(&self) -> &[PathBuf] {
        &self.filesystem_locations
    }

    pub fn has_filesystem_locations(&self) -> bool {
        !self.filesystem_locations.is_empty()
    }
}

impl fmt::Display for MenuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
