use serde::{Serialize, Serializer};

use crate::domain::{Callback, Command};

/// What an [`MenuNode::Action`] does when activated.
///
/// The two jump variants are resolved against the current context by the
/// engine at activation time; the tree itself never performs side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    Invoke(Callback),
    JumpToSite,
    JumpToFileSystem,
}

impl Handler {
    pub fn kind(&self) -> &'static str {
        match self {
            Handler::Invoke(_) => "invoke",
            Handler::JumpToSite => "jump_to_site",
            Handler::JumpToFileSystem => "jump_to_file_system",
        }
    }
}

impl Serialize for Handler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.kind())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuNode {
    Action {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        handler: Handler,
    },
    Submenu {
        title: String,
        children: Vec<MenuNode>,
    },
    Separator,
}

impl MenuNode {
    pub fn action(title: impl Into<String>, icon: Option<String>, handler: Handler) -> Self {
        MenuNode::Action {
            title: title.into(),
            icon,
            handler,
        }
    }

    pub fn submenu(title: impl Into<String>, children: Vec<MenuNode>) -> Self {
        MenuNode::Submenu {
            title: title.into(),
            children,
        }
    }

    pub fn from_command(command: &Command) -> Self {
        MenuNode::Action {
            title: command.name().to_string(),
            icon: command.icon().map(str::to_string),
            handler: Handler::Invoke(command.callback().clone()),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            MenuNode::Action { title, .. } | MenuNode::Submenu { title, .. } => Some(title),
            MenuNode::Separator => None,
        }
    }

    pub fn children(&self) -> &[MenuNode] {
        match self {
            MenuNode::Submenu { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuNode::Separator)
    }

    pub fn handler(&self) -> Option<&Handler> {
        match self {
            MenuNode::Action { handler, .. } => Some(handler),
            _ => None,
        }
    }
}

/// Resolves an action by its chain of titles, e.g. `["Loader", "Publish"]`.
///
/// The first node whose title matches wins at each level.
pub fn find_action<'a>(nodes: &'a [MenuNode], path: &[&str]) -> Option<&'a MenuNode> {
    let (head, rest) = path.split_first()?;
    let node = nodes.iter().find(|node| node.title() == Some(*head))?;
    match (node, rest.is_empty()) {
        (MenuNode::Action { .. }, true) => Some(node),
        (MenuNode::Submenu { children, .. }, false) => find_action(children, rest),
        _ => None,
    }
}

/// Every action in the tree, depth first, in display order.
pub fn collect_actions(nodes: &[MenuNode]) -> Vec<&MenuNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            MenuNode::Action { .. } => out.push(node),
            MenuNode::Submenu { children, .. } => out.extend(collect_actions(children)),
            MenuNode::Separator => {}
        }
    }
    out
}
