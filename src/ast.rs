/// A scanned input: free text interleaved with commands, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    pub items: Vec<Item>,
}

/// One piece of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Text outside any command, verbatim.
    Text(String),
    /// A recognized command.
    Command(Command),
}

/// A `set` or `get` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `set <name> <value>`.
    Set { name: String, value: String },
    /// `get <name>`, optionally followed by a value the lexer
    /// picked up after the name.
    Get { name: String, value: Option<String> },
}

impl Script {
    /// Iterate over the commands, skipping free text.
    #[must_use]
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.items.iter().filter_map(|item| match item {
            Item::Command(command) => Some(command),
            Item::Text(_) => None,
        })
    }
}

impl Command {
    /// Variable name the command refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Set { name, .. } | Self::Get { name, .. } => name,
        }
    }

    /// Value attached to the command, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set { value, .. } => Some(value),
            Self::Get { value, .. } => value.as_deref(),
        }
    }
}
