//! User command parsing

/// Simple prefix command parser.
///
/// This is useful when you want to extract a keyword from a message that starts with a fixed
/// command word followed by a space.
///
/// # Example
///
/// ```rust
/// use mcwiki::command::Command;
/// let command = Command::new("wiki");
/// assert_eq!(command.parse("wiki grass block"), Some("grass block"));
/// assert_eq!(command.parse("wiki "), Some(""));
/// assert_eq!(command.parse("wiki"), None);
/// assert_eq!(command.parse("wikipedia grass"), None);
/// ```
pub struct Command {
    /// The command word to match against.
    word: String,
}

impl Command {
    /// Creates a new prefix command parser that expects the given command word.
    #[must_use]
    pub fn new(word: &str) -> Command {
        Command {
            word: word.to_string(),
        }
    }

    /// Checks if the supplied input starts with the command word followed by a space, and if so,
    /// returns the trimmed remainder as the keyword.
    ///
    /// The keyword may be empty when the input is nothing but the command word and whitespace.
    /// Inputs where the command word is the start of a longer word do not match.
    #[must_use]
    pub fn parse<'a>(&self, input: &'a str) -> Option<&'a str> {
        let suffix = input.strip_prefix(&self.word)?;

        match suffix.chars().next() {
            // The proceeding character is a whitespace, so the rest is the keyword.
            Some(' ') => Some(suffix[1..].trim()),
            // There's a proceeding character and it's not whitespace, so the input is most likely
            // a longer word that happens to share the command word as a prefix.
            Some(_) => None,
            // The input is the bare command word with no trailing space, which is not a command.
            None => None,
        }
    }
}
