use std::sync::Arc;

use anyhow::{anyhow, Result};
use menu_builder::{MenuBuild, MenuBuilder, MenuFilter};
use menu_model::{find_action, CommandError, FavoriteRule, Handler, MenuNode, RawCommand};
use tracing::{debug, error, info};

pub mod config;
pub mod context;
pub mod opener;
pub mod registry;
pub mod render;

pub use config::{load_settings, load_settings_from, Settings};
pub use context::MenuContext;
pub use opener::{file_url, LoggingOpener, Opener};
pub use registry::CommandRegistry;
pub use render::{render_menu, MenuToolkit, OutlineToolkit};

/// Owns the command registry and keeps the menu tree in sync with it.
///
/// Every registration or context switch rebuilds the tree from a fresh
/// registry snapshot. Activation of the fixed context actions goes through
/// the [`Opener`]; its failures are logged, never returned.
pub struct MenuEngine<O: Opener> {
    registry: CommandRegistry,
    context: MenuContext,
    settings: Settings,
    opener: O,
    filter: Option<Arc<dyn MenuFilter>>,
    current: MenuBuild,
}

impl<O: Opener> MenuEngine<O> {
    pub fn new(
        registry: CommandRegistry,
        context: MenuContext,
        settings: Settings,
        opener: O,
    ) -> Self {
        let mut engine = Self {
            registry,
            context,
            settings,
            opener,
            filter: None,
            current: MenuBuild {
                nodes: Vec::new(),
                missed_favorites: Vec::new(),
            },
        };
        engine.rebuild();
        engine
    }

    pub fn with_filter(mut self, filter: impl MenuFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self.rebuild();
        self
    }

    pub fn register(&mut self, raw: RawCommand) -> Result<(), CommandError> {
        self.registry.register(raw)?;
        self.rebuild();
        Ok(())
    }

    pub fn set_context(&mut self, context: MenuContext) {
        info!(from = %self.context, to = %context, "context changed");
        self.context = context;
        self.rebuild();
    }

    pub fn rebuild(&mut self) -> &[MenuNode] {
        let mut builder = MenuBuilder::new(self.context.label())
            .favorites(self.settings.menu_favourites.iter().cloned())
            .filesystem_locations(self.context.has_filesystem_locations());
        if let Some(filter) = &self.filter {
            builder = builder.shared_filter(Arc::clone(filter));
        }

        self.current = builder.build(&self.registry.snapshot());
        debug!(
            context = %self.context,
            commands = self.registry.len(),
            missed_favorites = self.current.missed_favorites.len(),
            "rebuilt menu"
        );
        &self.current.nodes
    }

    pub fn menu(&self) -> &[MenuNode] {
        &self.current.nodes
    }

    pub fn missed_favorites(&self) -> &[FavoriteRule] {
        &self.current.missed_favorites
    }

    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Renders the current tree under the configured menu title.
    pub fn render<T: MenuToolkit>(&self, toolkit: &mut T) -> T::Menu {
        render_menu(toolkit, &self.settings.menu_title, &self.current.nodes)
    }

    pub fn activate(&self, handler: &Handler) {
        match handler {
            Handler::Invoke(callback) => callback.invoke(),
            Handler::JumpToSite => self.jump_to_site(),
            Handler::JumpToFileSystem => self.jump_to_file_system(),
        }
    }

    /// Activates the action at `path`, a chain of menu titles below the root menu.
    pub fn activate_path(&self, path: &[&str]) -> Result<()> {
        let node = find_action(&self.current.nodes, path)
            .ok_or_else(|| anyhow!("no menu action at '{}'", path.join(" > ")))?;
        if let Some(handler) = node.handler() {
            info!(action = %path.join(" > "), kind = handler.kind(), "activating menu action");
            self.activate(handler);
        }
        Ok(())
    }

    fn jump_to_site(&self) {
        let url = self.context.site_url();
        if let Err(err) = self.opener.open_url(url) {
            error!(%url, error = %err, "failed to open site url");
        }
    }

    fn jump_to_file_system(&self) {
        for location in self.context.filesystem_locations() {
            let opened = file_url(location).and_then(|url| self.opener.open_url(&url));
            if let Err(err) = opened {
                error!(location = %location.display(), error = %err, "failed to open location");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
