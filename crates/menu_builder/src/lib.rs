//! Menu tree construction.
//!
//! Turns a flat snapshot of registry commands into the ordered menu shown to
//! the user: the context section first, then favorites, then one sub-menu per
//! owning app. The builder is pure; callbacks are carried into the tree and
//! never invoked here.

use std::{collections::BTreeMap, fmt, sync::Arc};

use menu_model::{Command, FavoriteRule, Handler, MenuNode};
use tracing::{debug, warn};

pub const JUMP_TO_SITE_TITLE: &str = "Jump to Shotgun";
pub const JUMP_TO_FILE_SYSTEM_TITLE: &str = "Jump to File System";
/// Group for commands that were not registered by an app.
pub const OTHER_ITEMS_GROUP: &str = "Other Items";

/// Host-specific filtering of the commands that end up in the per-app groups.
///
/// Runs after context items and favorites have been taken out. A filter that
/// drops commands takes them out of the menu entirely.
pub trait MenuFilter: Send + Sync {
    fn filter(&self, commands: Vec<Command>) -> Vec<Command>;
}

impl<F> MenuFilter for F
where
    F: Fn(Vec<Command>) -> Vec<Command> + Send + Sync,
{
    fn filter(&self, commands: Vec<Command>) -> Vec<Command> {
        self(commands)
    }
}

/// Result of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBuild {
    pub nodes: Vec<MenuNode>,
    /// Favorite rules that matched nothing in the working set, in rule order.
    pub missed_favorites: Vec<FavoriteRule>,
}

#[derive(Clone)]
pub struct MenuBuilder {
    favorites: Vec<FavoriteRule>,
    context_label: String,
    has_filesystem_locations: bool,
    filter: Option<Arc<dyn MenuFilter>>,
}

impl fmt::Debug for MenuBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuBuilder")
            .field("favorites", &self.favorites)
            .field("context_label", &self.context_label)
            .field("has_filesystem_locations", &self.has_filesystem_locations)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl MenuBuilder {
    pub fn new(context_label: impl Into<String>) -> Self {
        Self {
            favorites: Vec::new(),
            context_label: context_label.into(),
            has_filesystem_locations: false,
            filter: None,
        }
    }

    pub fn favorites(mut self, rules: impl IntoIterator<Item = FavoriteRule>) -> Self {
        self.favorites = rules.into_iter().collect();
        self
    }

    pub fn filesystem_locations(mut self, available: bool) -> Self {
        self.has_filesystem_locations = available;
        self
    }

    pub fn filter(self, filter: impl MenuFilter + 'static) -> Self {
        self.shared_filter(Arc::new(filter))
    }

    pub fn shared_filter(mut self, filter: Arc<dyn MenuFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Builds a fresh tree. `commands` is only read; every pass works on a copy.
    pub fn build(&self, commands: &[Command]) -> MenuBuild {
        let mut working = commands.to_vec();

        let context_items = extract_context_items(&mut working);
        let mut nodes = vec![context_section(
            &self.context_label,
            self.has_filesystem_locations,
            &context_items,
        )];

        let (favorites, missed_favorites) = extract_favorites(&mut working, &self.favorites);
        if !favorites.is_empty() {
            nodes.push(MenuNode::Separator);
            nodes.extend(favorites.iter().map(MenuNode::from_command));
            nodes.push(MenuNode::Separator);
        }

        let working = match &self.filter {
            Some(filter) => filter.filter(working),
            None => working,
        };
        nodes.extend(flatten_single_child(group_by_app(&working)));

        debug!(
            commands = commands.len(),
            context_items = context_items.len(),
            favorites = favorites.len(),
            missed_favorites = missed_favorites.len(),
            top_level = nodes.len(),
            "built menu tree"
        );

        MenuBuild {
            nodes,
            missed_favorites,
        }
    }
}

/// One-shot form of [`MenuBuilder::build`] returning only the nodes.
pub fn build_menu(
    commands: &[Command],
    favorite_rules: &[FavoriteRule],
    context_label: &str,
    has_filesystem_locations: bool,
) -> Vec<MenuNode> {
    MenuBuilder::new(context_label)
        .favorites(favorite_rules.iter().cloned())
        .filesystem_locations(has_filesystem_locations)
        .build(commands)
        .nodes
}

/// Removes context menu commands from `working`, sorted by name.
fn extract_context_items(working: &mut Vec<Command>) -> Vec<Command> {
    let (mut context_items, rest): (Vec<_>, Vec<_>) = working
        .drain(..)
        .partition(Command::is_context_menu_item);
    *working = rest;
    context_items.sort_by(|a, b| a.name().cmp(b.name()));
    context_items
}

fn context_section(label: &str, has_filesystem_locations: bool, items: &[Command]) -> MenuNode {
    let mut children = Vec::with_capacity(items.len() + 3);
    children.push(MenuNode::action(JUMP_TO_SITE_TITLE, None, Handler::JumpToSite));
    if has_filesystem_locations {
        children.push(MenuNode::action(
            JUMP_TO_FILE_SYSTEM_TITLE,
            None,
            Handler::JumpToFileSystem,
        ));
    }
    children.push(MenuNode::Separator);
    children.extend(items.iter().map(MenuNode::from_command));
    MenuNode::submenu(label, children)
}

/// Moves the first command matching each rule out of `working`, in rule order.
fn extract_favorites(
    working: &mut Vec<Command>,
    rules: &[FavoriteRule],
) -> (Vec<Command>, Vec<FavoriteRule>) {
    let mut favorites = Vec::new();
    let mut missed = Vec::new();

    for rule in rules {
        match working.iter().position(|command| rule.matches(command)) {
            Some(index) => favorites.push(working.remove(index)),
            None => {
                warn!(
                    app_instance = %rule.app_instance,
                    name = %rule.name,
                    "could not add favorite"
                );
                missed.push(rule.clone());
            }
        }
    }

    (favorites, missed)
}

/// One sub-menu per owning app, sorted by app name, commands in supplied order.
fn group_by_app(commands: &[Command]) -> Vec<MenuNode> {
    let mut groups: BTreeMap<&str, Vec<&Command>> = BTreeMap::new();
    for command in commands {
        let group = command
            .app()
            .map(|app| app.display_name())
            .unwrap_or(OTHER_ITEMS_GROUP);
        groups.entry(group).or_default().push(command);
    }

    groups
        .into_iter()
        .map(|(title, commands)| {
            MenuNode::submenu(
                title,
                commands.into_iter().map(MenuNode::from_command).collect(),
            )
        })
        .collect()
}

fn flatten_single_child(nodes: Vec<MenuNode>) -> Vec<MenuNode> {
    nodes
        .into_iter()
        .map(|node| match node {
            MenuNode::Submenu { mut children, .. } if children.len() == 1 => children.remove(0),
            other => other,
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
