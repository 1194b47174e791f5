//! TOML description of a command registry, for driving the menu outside a host.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use engine::CommandRegistry;
use menu_model::{Callback, OwningApp, RawCommand};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    pub app_instance: Option<String>,
    pub app_display_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub icon: Option<String>,
}

impl RegistryFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry file '{}'", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid registry file '{}'", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Registers every entry. Activating a command only reports that it fired.
    pub fn into_registry(self) -> Result<CommandRegistry> {
        let mut registry = CommandRegistry::new();
        for entry in self.commands {
            let app = match entry.app_instance {
                Some(instance) => {
                    let display = entry.app_display_name.unwrap_or_default();
                    Some(OwningApp::new(instance, display)?)
                }
                None => None,
            };
            let name = entry.name.clone();
            registry.register(RawCommand {
                name: entry.name,
                app,
                kind: entry.kind,
                icon: entry.icon,
                callback: Some(Callback::new(move || {
                    info!(command = %name, "command invoked");
                    println!("invoked {name}");
                })),
            })?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_registers_in_file_order() {
        let file = RegistryFile::parse(
            r#"
[[commands]]
name = "Publish..."
app_instance = "tk-multi-publish2"
app_display_name = "Publisher"
icon = "icons/publish.png"

[[commands]]
name = "Work Area Info..."
app_instance = "tk-multi-workfiles2"
type = "context_menu"

[[commands]]
name = "Reload and Restart"
"#,
        )
        .expect("parse");

        let registry = file.into_registry().expect("registry");
        let commands: Vec<_> = registry.iter().collect();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].icon(), Some("icons/publish.png"));
        assert_eq!(
            commands[0].app().map(|app| app.display_name()),
            Some("Publisher")
        );
        assert!(commands[1].is_context_menu_item());
        assert_eq!(
            commands[1].app().map(|app| app.display_name()),
            Some("tk-multi-workfiles2")
        );
        assert!(commands[2].app().is_none());
    }

    #[test]
    fn blank_command_name_fails_registration() {
        let file = RegistryFile::parse("[[commands]]\nname = \"\"\n").expect("parse");
        let err = file.into_registry().expect_err("blank name");
        assert!(err.to_string().contains("must not be empty"));
    }
}
