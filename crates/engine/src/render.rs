//! Projection of a built menu tree onto a toolkit's menu objects.

use std::fmt;

use menu_model::{Handler, MenuNode};

/// The menu bar of a concrete UI toolkit.
///
/// `Menu` is the toolkit's handle to a menu container. `add_menu` with no
/// parent attaches a top-level menu to the bar itself.
pub trait MenuToolkit {
    type Menu;

    fn add_menu(&mut self, parent: Option<&Self::Menu>, title: &str) -> Self::Menu;
    fn add_action(
        &mut self,
        parent: &Self::Menu,
        title: &str,
        icon: Option<&str>,
        handler: &Handler,
    );
    fn add_separator(&mut self, parent: &Self::Menu);
}

/// Adds `root_title` to the menu bar and fills it with `nodes`, in order.
pub fn render_menu<T: MenuToolkit>(
    toolkit: &mut T,
    root_title: &str,
    nodes: &[MenuNode],
) -> T::Menu {
    let root = toolkit.add_menu(None, root_title);
    render_into(toolkit, &root, nodes);
    root
}

fn render_into<T: MenuToolkit>(toolkit: &mut T, parent: &T::Menu, nodes: &[MenuNode]) {
    for node in nodes {
        match node {
            MenuNode::Separator => toolkit.add_separator(parent),
            MenuNode::Submenu { title, children } => {
                let submenu = toolkit.add_menu(Some(parent), title);
                render_into(toolkit, &submenu, children);
            }
            MenuNode::Action {
                title,
                icon,
                handler,
            } => toolkit.add_action(parent, title, icon.as_deref(), handler),
        }
    }
}

/// Text toolkit: renders menus as an indented outline.
///
/// Sub-menus end in `>`, separators are `---`, icons follow the title in brackets.
#[derive(Debug, Default)]
pub struct OutlineToolkit {
    lines: Vec<String>,
}

impl OutlineToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, depth: usize, text: String) {
        self.lines.push(format!("{}{text}", "  ".repeat(depth)));
    }
}

impl MenuToolkit for OutlineToolkit {
    /// Nesting depth of the menu.
    type Menu = usize;

    fn add_menu(&mut self, parent: Option<&usize>, title: &str) -> usize {
        let depth = parent.map_or(0, |depth| depth + 1);
        self.push(depth, format!("{title} >"));
        depth
    }

    fn add_action(&mut self, parent: &usize, title: &str, icon: Option<&str>, _handler: &Handler) {
        let text = match icon {
            Some(icon) => format!("{title} [{icon}]"),
            None => title.to_string(),
        };
        self.push(parent + 1, text);
    }

    fn add_separator(&mut self, parent: &usize) {
        self.push(parent + 1, "---".into());
    }
}

impl fmt::Display for OutlineToolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingToolkit {
        next_id: usize,
        calls: Vec<String>,
    }

    impl MenuToolkit for RecordingToolkit {
        type Menu = usize;

        fn add_menu(&mut self, parent: Option<&usize>, title: &str) -> usize {
            self.next_id += 1;
            self.calls
                .push(format!("menu {} in {:?}: {title}", self.next_id, parent));
            self.next_id
        }

        fn add_action(
            &mut self,
            parent: &usize,
            title: &str,
            _icon: Option<&str>,
            handler: &Handler,
        ) {
            self.calls
                .push(format!("action in {parent}: {title} ({})", handler.kind()));
        }

        fn add_separator(&mut self, parent: &usize) {
            self.calls.push(format!("separator in {parent}"));
        }
    }

    fn nodes() -> Vec<MenuNode> {
        vec![
            MenuNode::submenu(
                "Shot 010",
                vec![
                    MenuNode::action("Jump to Shotgun", None, Handler::JumpToSite),
                    MenuNode::Separator,
                ],
            ),
            MenuNode::action("Scan", Some("scan.png".into()), Handler::JumpToFileSystem),
        ]
    }

    #[test]
    fn walks_nodes_depth_first_in_sequence_order() {
        let mut toolkit = RecordingToolkit::default();
        let root = render_menu(&mut toolkit, "Shotgun", &nodes());

        assert_eq!(root, 1);
        assert_eq!(
            toolkit.calls,
            vec![
                "menu 1 in None: Shotgun",
                "menu 2 in Some(1): Shot 010",
                "action in 2: Jump to Shotgun (jump_to_site)",
                "separator in 2",
                "action in 1: Scan (jump_to_file_system)",
            ]
        );
    }

    #[test]
    fn outline_indents_by_depth() {
        let mut toolkit = OutlineToolkit::new();
        render_menu(&mut toolkit, "Shotgun", &nodes());

        assert_eq!(
            toolkit.to_string(),
            "Shotgun >\n  Shot 010 >\n    Jump to Shotgun\n    ---\n  Scan [scan.png]\n"
        );
    }
}
