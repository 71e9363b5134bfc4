//! Interaction modes and the phrases each one recognizes

/// Words that end a voice session
const VOICE_QUIT_WORDS: [&str; 4] = ["quit", "exit", "stop", "goodbye"];

/// How the user talks to the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Voice,
}

/// What to do with one piece of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing usable was entered
    Ignore,
    /// End the program
    Quit,
    /// Move to the other mode with a fresh session
    Switch,
    /// Hand the text to the model
    Ask(String),
}

impl Mode {
    /// Classify raw input
    pub fn interpret(self, input: &str) -> Command {
        let input = input.trim();
        if input.is_empty() {
            return Command::Ignore;
        }

        let lower = input.to_lowercase();
        match self {
            Self::Text if lower == "quit" => Command::Quit,
            Self::Text if lower == "voice" => Command::Switch,
            Self::Voice if VOICE_QUIT_WORDS.contains(&lower.as_str()) => Command::Quit,
            Self::Voice if lower.contains("text mode") => Command::Switch,
            _ => Command::Ask(input.to_string()),
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Text => Self::Voice,
            Self::Voice => Self::Text,
        }
    }

    /// Said when input could not be used
    pub fn retry_prompt(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Voice => Some("I didn't catch that. Please try again."),
        }
    }

    /// Said after a failed turn, following the printed error
    pub fn apology(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Voice => Some("Sorry, something went wrong. Please try again."),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Voice => write!(f, "voice"),
        }
    }
}
