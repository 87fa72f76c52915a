//! # Command Tokenizer
//!
//! Splits a command line (e.g. `!model "llama3.1:latest"`) into arguments using shell-like
//! rules: whitespace separates words, double quotes group words, and a backslash escapes the
//! next character.
//!
//! The tokenizer never fails. Input that ends in the middle of a quoted span or right after a
//! backslash is accepted as is: the buffered characters become the last argument, and a dangling
//! backslash is kept as a literal backslash.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between arguments.
    Unquoted,
    BuildingWord,
    BuildingQuoted,
    EscapeInWord,
    EscapeInQuoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Quote,
    Backslash,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            '"' => CharClass::Quote,
            '\\' => CharClass::Backslash,
            c if c.is_whitespace() => CharClass::Whitespace,
            _ => CharClass::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Consume the character without keeping it.
    Drop,
    /// Append the character to the current argument.
    Push,
    /// Emit the current argument.
    Flush,
}

impl State {
    fn next(self, class: CharClass) -> (State, Action) {
        match self {
            State::Unquoted => match class {
                CharClass::Whitespace => (State::Unquoted, Action::Drop),
                CharClass::Quote => (State::BuildingQuoted, Action::Drop),
                CharClass::Backslash => (State::EscapeInWord, Action::Drop),
                CharClass::Other => (State::BuildingWord, Action::Push),
            },
            State::BuildingWord => match class {
                CharClass::Whitespace => (State::Unquoted, Action::Flush),
                CharClass::Backslash => (State::EscapeInWord, Action::Drop),
                // A quote inside a word is an ordinary character.
                CharClass::Quote | CharClass::Other => (State::BuildingWord, Action::Push),
            },
            State::BuildingQuoted => match class {
                CharClass::Quote => (State::Unquoted, Action::Flush),
                CharClass::Backslash => (State::EscapeInQuoted, Action::Drop),
                CharClass::Whitespace | CharClass::Other => (State::BuildingQuoted, Action::Push),
            },
            State::EscapeInWord => (State::BuildingWord, Action::Push),
            State::EscapeInQuoted => (State::BuildingQuoted, Action::Push),
        }
    }
}

/// Splits `line` into arguments. Empty or all-whitespace input yields no arguments.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut state = State::Unquoted;

    for c in line.chars() {
        let (next, action) = state.next(CharClass::of(c));
        match action {
            Action::Drop => {}
            Action::Push => current.push(c),
            Action::Flush => args.push(std::mem::take(&mut current)),
        }
        state = next;
    }

    // End of input behaves like a trailing separator.
    match state {
        State::Unquoted => {}
        State::BuildingWord | State::BuildingQuoted => args.push(current),
        State::EscapeInWord | State::EscapeInQuoted => {
            current.push('\\');
            args.push(current);
        }
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        tokenize(line)
    }

    #[test]
    fn test_quoted_argument() {
        assert_eq!(toks(r#"!say "a b" c"#), vec!["!say", "a b", "c"]);
    }

    #[test]
    fn test_escaped_space() {
        assert_eq!(toks(r"!say a\ b"), vec!["!say", "a b"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(toks("").is_empty());
        assert!(toks("   ").is_empty());
        assert!(toks("\t\n ").is_empty());
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(toks("  !model \t llama3  \n"), vec!["!model", "llama3"]);
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        assert_eq!(toks(r#"!enable "say \"hi\" now""#), vec!["!enable", r#"say "hi" now"#]);
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(toks(r"a\\b"), vec![r"a\b"]);
    }

    #[test]
    fn test_empty_quotes_yield_empty_argument() {
        assert_eq!(toks(r#"!enable """#), vec!["!enable", ""]);
    }

    #[test]
    fn test_quote_inside_word_is_literal() {
        assert_eq!(toks(r#"it"s fine"#), vec![r#"it"s"#, "fine"]);
    }

    #[test]
    fn test_closing_quote_ends_argument() {
        assert_eq!(toks(r#""a"b"#), vec!["a", "b"]);
    }

    #[test]
    fn test_backslash_starts_word() {
        assert_eq!(toks(r"!say \ a"), vec!["!say", " a"]);
    }

    #[test]
    fn test_unterminated_quote_is_flushed() {
        assert_eq!(toks(r#"!say "a b"#), vec!["!say", "a b"]);
        assert_eq!(toks(r#"!say ""#), vec!["!say", ""]);
    }

    #[test]
    fn test_trailing_backslash_is_literal() {
        assert_eq!(toks(r"!say abc\"), vec!["!say", r"abc\"]);
        assert_eq!(toks(r"!say \"), vec!["!say", r"\"]);
        assert_eq!(toks(r#"!say "abc\"#), vec!["!say", r"abc\"]);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(toks("!say héllo \"wörld ✓\""), vec!["!say", "héllo", "wörld ✓"]);
    }

    #[test]
    fn test_unquoted_rejoin_is_stable() {
        for line in ["!model  llama3.1:latest", "  a b\tc  ", "!help", "x"] {
            let first = toks(line);
            let second = toks(&first.join(" "));
            assert_eq!(first, second, "line: {line:?}");
        }
    }
}
