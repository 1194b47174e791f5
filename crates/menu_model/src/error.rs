use thiserror::Error;

/// Malformed command metadata rejected at the registration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command name must not be empty")]
    EmptyName,
    #[error("command '{name}' has no handler")]
    MissingHandler { name: String },
    #[error("app '{display_name}' has an empty instance name")]
    EmptyAppInstance { display_name: String },
}
