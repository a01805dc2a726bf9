//! Command definitions and parsing

/// A user command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `search <text>` or `/ <text>` - submit the search form
    Search(String),
    /// `open <n>` - select row n (1-based) of the visible panel
    Open(usize),
    /// `save <n>` - download attachment n (1-based) and open it
    Save(usize),
    /// `recent` - show the recent-emails panel
    Recent,
    /// `results` - show the search-results panel
    Results,
    /// `check` - pull new mail on the server, then reload the recent panel
    Check,
    /// `help` or `?`
    Help,
    /// `quit`, `exit` or `q`
    Quit,
    /// Empty line, redraw
    Redraw,
    /// Anything unrecognised, with a reason for the user
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Redraw;
        }

        // "/invoice" and "/ invoice" both search
        if let Some(rest) = line.strip_prefix('/') {
            return Self::Search(rest.to_string());
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Self::Search(rest.to_string()),
            "open" | "o" => Self::parse_index(rest, Self::Open),
            "save" => Self::parse_index(rest, Self::Save),
            "recent" | "back" => Self::Recent,
            "results" => Self::Results,
            "check" => Self::Check,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            // A bare number opens that row
            _ if word.chars().all(|c| c.is_ascii_digit()) && rest.is_empty() => {
                Self::parse_index(word, Self::Open)
            }
            _ => Self::Invalid(format!("Unknown command: {}", word)),
        }
    }

    fn parse_index(arg: &str, make: fn(usize) -> Self) -> Self {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => make(n),
            _ => Self::Invalid(format!("Expected a number starting at 1, got \"{}\"", arg)),
        }
    }
}
