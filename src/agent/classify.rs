//! Input classification: control directive, chat query, or task request

/// Marker that turns an input into a chat query
pub const CHAT_MARKER: char = '!';

/// Session directives handled without calling the model.
///
/// Matched exactly and case-sensitively against the trimmed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Exit,
    Clear,
    AutoConfirmOn,
    AutoConfirmOff,
}

impl Directive {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "/exit" => Some(Directive::Exit),
            "/clear" => Some(Directive::Clear),
            "/auto-true" => Some(Directive::AutoConfirmOn),
            "/auto-false" => Some(Directive::AutoConfirmOff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::Exit => "/exit",
            Directive::Clear => "/clear",
            Directive::AutoConfirmOn => "/auto-true",
            Directive::AutoConfirmOff => "/auto-false",
        }
    }
}

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Control(Directive),
    /// `query` has the marker removed; `original` is the input as typed
    Chat { original: &'a str, query: &'a str },
    Task(&'a str),
}

/// Classify one trimmed line of input
pub fn classify(input: &str) -> Input<'_> {
    if let Some(directive) = Directive::parse(input) {
        return Input::Control(directive);
    }

    if is_chat_query(input) {
        let query = input.strip_prefix(CHAT_MARKER).unwrap_or(input);
        Input::Chat {
            original: input,
            query,
        }
    } else {
        Input::Task(input)
    }
}

/// Lowercased, trimmed input starts with the chat marker
pub fn is_chat_query(input: &str) -> bool {
    input.trim().to_lowercase().starts_with(CHAT_MARKER)
}
