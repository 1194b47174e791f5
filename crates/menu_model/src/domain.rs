use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Host `type` property value that routes a command into the context section.
pub const CONTEXT_MENU_TYPE: &str = "context_menu";

/// Application that registered a command.
///
/// Favorites are matched against `instance_name` (the configured app instance,
/// e.g. `tk-multi-loader`); menus are grouped under `display_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwningApp {
    instance_name: String,
    display_name: String,
}

impl OwningApp {
    pub fn new(
        instance_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, CommandError> {
        let instance_name = instance_name.into();
        let display_name = display_name.into();
        if instance_name.trim().is_empty() {
            return Err(CommandError::EmptyAppInstance { display_name });
        }
        let display_name = if display_name.trim().is_empty() {
            instance_name.clone()
        } else {
            display_name
        };
        Ok(Self {
            instance_name,
            display_name,
        })
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    #[default]
    Default,
    ContextMenu,
}

impl CommandKind {
    /// Maps the host's free-form `type` property. Unknown values are ordinary commands.
    pub fn from_type(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(CONTEXT_MENU_TYPE) => Self::ContextMenu,
            _ => Self::Default,
        }
    }
}

/// Shared invocable fired when a menu action is activated.
///
/// Two callbacks compare equal only when they share the same allocation.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// Command registration as handed over by the host, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawCommand {
    pub name: String,
    pub app: Option<OwningApp>,
    pub kind: Option<String>,
    pub icon: Option<String>,
    pub callback: Option<Callback>,
}

/// A validated, immutable registry command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    app: Option<OwningApp>,
    kind: CommandKind,
    icon: Option<String>,
    callback: Callback,
}

impl Command {
    pub fn new(name: impl Into<String>, callback: Callback) -> Result<Self, CommandError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommandError::EmptyName);
        }
        Ok(Self {
            name,
            app: None,
            kind: CommandKind::Default,
            icon: None,
            callback,
        })
    }

    pub fn with_app(mut self, app: OwningApp) -> Self {
        self.app = Some(app);
        self
    }

    pub fn with_kind(mut self, kind: CommandKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        self.icon = (!icon.is_empty()).then_some(icon);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app(&self) -> Option<&OwningApp> {
        self.app.as_ref()
    }

    pub fn app_instance_name(&self) -> Option<&str> {
        self.app.as_ref().map(OwningApp::instance_name)
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn is_context_menu_item(&self) -> bool {
        self.kind == CommandKind::ContextMenu
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }
}

impl TryFrom<RawCommand> for Command {
    type Error = CommandError;

    fn try_from(raw: RawCommand) -> Result<Self, Self::Error> {
        let Some(callback) = raw.callback else {
            return Err(if raw.name.trim().is_empty() {
                CommandError::EmptyName
            } else {
                CommandError::MissingHandler { name: raw.name }
            });
        };

        let mut command = Command::new(raw.name, callback)?
            .with_kind(CommandKind::from_type(raw.kind.as_deref()));
        if let Some(app) = raw.app {
            command = command.with_app(app);
        }
        if let Some(icon) = raw.icon {
            command = command.with_icon(icon);
        }
        Ok(command)
    }
}

/// One `menu_favourites` entry: promote `name` registered by `app_instance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteRule {
    pub app_instance: String,
    pub name: String,
}

impl FavoriteRule {
    pub fn new(app_instance: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_instance: app_instance.into(),
            name: name.into(),
        }
    }

    pub fn matches(&self, command: &Command) -> bool {
        command.app_instance_name() == Some(self.app_instance.as_str())
            && command.name() == self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback {
        Callback::new(|| {})
    }

    #[test]
    fn raw_command_without_callback_is_rejected() {
        let raw = RawCommand {
            name: "Publish...".into(),
            ..RawCommand::default()
        };
        let err = Command::try_from(raw).expect_err("missing handler");
        assert!(matches!(err, CommandError::MissingHandler { ref name } if name == "Publish..."));
    }

    #[test]
    fn raw_command_with_blank_name_is_rejected() {
        let raw = RawCommand {
            name: "  ".into(),
            callback: Some(noop()),
            ..RawCommand::default()
        };
        assert!(matches!(
            Command::try_from(raw),
            Err(CommandError::EmptyName)
        ));
    }

    #[test]
    fn context_menu_type_sets_kind_and_empty_icon_is_dropped() {
        let raw = RawCommand {
            name: "Work Area Info...".into(),
            kind: Some("context_menu".into()),
            icon: Some(String::new()),
            callback: Some(noop()),
            ..RawCommand::default()
        };
        let command = Command::try_from(raw).expect("valid");
        assert!(command.is_context_menu_item());
        assert_eq!(command.icon(), None);
    }

    #[test]
    fn unknown_type_is_an_ordinary_command() {
        assert_eq!(CommandKind::from_type(Some("panel")), CommandKind::Default);
        assert_eq!(CommandKind::from_type(None), CommandKind::Default);
    }

    #[test]
    fn owning_app_falls_back_to_instance_name_for_display() {
        let app = OwningApp::new("tk-multi-loader", "").expect("app");
        assert_eq!(app.display_name(), "tk-multi-loader");
        assert_eq!(
            OwningApp::new(" ", "Loader"),
            Err(CommandError::EmptyAppInstance {
                display_name: "Loader".into()
            })
        );
    }

    #[test]
    fn callbacks_compare_by_identity() {
        let a = noop();
        let b = noop();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn favorite_rule_matches_instance_and_name() {
        let app = OwningApp::new("tk-multi-loader", "Loader").expect("app");
        let command = Command::new("Load", noop()).expect("command").with_app(app);
        assert!(FavoriteRule::new("tk-multi-loader", "Load").matches(&command));
        assert!(!FavoriteRule::new("Loader", "Load").matches(&command));
        assert!(!FavoriteRule::new("tk-multi-loader", "load").matches(&command));

        let orphan = Command::new("Load", noop()).expect("command");
        assert!(!FavoriteRule::new("tk-multi-loader", "Load").matches(&orphan));
    }

    #[test]
    fn favorite_rules_deserialize_from_settings_shape() {
        let rules: Vec<FavoriteRule> = serde_json::from_str(
            r#"[{"app_instance":"tk-multi-publish2","name":"Publish..."}]"#,
        )
        .expect("json");
        assert_eq!(rules, vec![FavoriteRule::new("tk-multi-publish2", "Publish...")]);
    }
}
