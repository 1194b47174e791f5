use menu_model::{Command, CommandError, RawCommand};

/// Commands registered by apps, in registration order.
///
/// Builds never read the registry directly; they work on a [`snapshot`](Self::snapshot).
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, raw: RawCommand) -> Result<(), CommandError> {
        let command = Command::try_from(raw)?;
        self.register_command(command);
        Ok(())
    }

    pub fn register_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn snapshot(&self) -> Vec<Command> {
        self.commands.clone()
    }
}

impl FromIterator<Command> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
