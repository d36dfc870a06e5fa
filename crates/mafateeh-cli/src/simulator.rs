use mafateeh_core::{
    KeyboardSession, PhraseStore, Result, Side, StringDocument, SystemClipboard,
};
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Suggestion(Side),
    Backspace,
    Space,
    Return,
    Shift,
    OpenGroup(usize),
    Key(String),
    CloseGroup,
    Numbers,
    Symbols,
    ListPhrases,
    InsertPhrase(usize),
    Paste,
    Quit,
    Text(String),
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();
    let index = || arg.and_then(|a| a.parse::<usize>().ok()).filter(|n| *n > 0);

    match (name, arg) {
        ("1", None) => Input::Suggestion(Side::Left),
        ("2", None) => Input::Suggestion(Side::Right),
        ("b", None) => Input::Backspace,
        ("sp", None) => Input::Space,
        ("r", None) => Input::Return,
        ("s", None) => Input::Shift,
        ("x", None) => Input::CloseGroup,
        ("123", None) => Input::Numbers,
        ("sym", None) => Input::Symbols,
        ("v", None) => Input::Paste,
        ("q", None) => Input::Quit,
        ("p", None) => Input::ListPhrases,
        ("p", Some(_)) => index().map_or(Input::Unknown(line.to_string()), |n| {
            Input::InsertPhrase(n - 1)
        }),
        ("g", Some(_)) => index().map_or(Input::Unknown(line.to_string()), |n| {
            Input::OpenGroup(n - 1)
        }),
        ("k", Some(key)) => Input::Key(key.to_string()),
        _ => Input::Unknown(line.to_string()),
    }
}

/// Line driven stand-in for the keyboard extension.
pub fn run_keyboard_simulator(store: &PhraseStore) -> Result<()> {
    let mut session = KeyboardSession::new(StringDocument::default());
    let stdin = io::stdin();
    let mut out = io::stdout();

    print_ui(&mut out, &session, None)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let (keep_going, message) = apply(&mut session, parse_input(&line), store)?;
        if !keep_going {
            break;
        }
        print_ui(&mut out, &session, message.as_deref())?;
    }

    writeln!(out, "\nFinal text:\n{}", session.document().text())?;
    Ok(())
}

fn apply(
    session: &mut KeyboardSession<StringDocument>,
    input: Input,
    store: &PhraseStore,
) -> Result<(bool, Option<String>)> {
    let mut message = None;
    match input {
        Input::Quit => return Ok((false, None)),
        Input::Suggestion(side) => session.accept_suggestion(side),
        Input::Backspace => session.backspace(),
        Input::Space => session.space(),
        Input::Return => session.return_key(),
        Input::Shift => session.toggle_shift(),
        Input::Numbers => session.numbers(),
        Input::Symbols => session.symbols(),
        Input::CloseGroup => session.close_enlarged(),
        Input::Text(text) => session.insert_text(&text),
        Input::OpenGroup(index) => {
            if !session.open_group(index) {
                message = Some(format!("No key group {}", index + 1));
            }
        }
        Input::Key(key) => {
            if !session.press_key(&key) {
                message = Some(format!("'{}' is not in the open key group", key));
            }
        }
        // The phrase picker always reads the store fresh.
        Input::ListPhrases => {
            let phrases = store.list()?;
            message = Some(if phrases.is_empty() {
                "You have no saved phrases".to_string()
            } else {
                phrases
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("  :p {}  {}", i + 1, p.preview(40)))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
        Input::InsertPhrase(index) => match store.list()?.get(index) {
            Some(phrase) => session.insert_phrase(phrase),
            None => message = Some(format!("No saved phrase {}", index + 1)),
        },
        Input::Paste => {
            let pasted = SystemClipboard::new()
                .and_then(|mut clipboard| session.paste_from(&mut clipboard));
            match pasted {
                Ok(true) => {}
                Ok(false) => message = Some("Clipboard is empty".to_string()),
                Err(e) => message = Some(e.to_string()),
            }
        }
        Input::Unknown(line) => message = Some(format!("Unknown command: {}", line)),
    }
    Ok((true, message))
}

fn print_ui(
    out: &mut impl Write,
    session: &KeyboardSession<StringDocument>,
    message: Option<&str>,
) -> Result<()> {
    // Basic clear screen for simplicity
    write!(out, "\x1B[2J\x1B[1;1H")?;
    writeln!(out, "Mafateeh keyboard simulator")?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Type text and press Enter. ':1'/':2' take a suggestion, ':g N' opens")?;
    writeln!(out, "a key group, ':k X' presses a key, ':x' closes it, ':s' shift,")?;
    writeln!(out, "':b' backspace, ':sp' space, ':r' return, ':p' phrases, ':p N' inserts,")?;
    writeln!(out, "':v' pastes, ':q' quits.\n")?;

    writeln!(out, "Text: [{}]", session.document().text())?;
    let suggestions = session.suggestions();
    writeln!(out, "Suggestions: {} | {}", suggestions.left, suggestions.right)?;

    match session.enlarged_template() {
        Some(template) => {
            writeln!(out, "\n  {}", template.top.join("  "))?;
            writeln!(out, "  {}", template.bottom.join("  "))?;
        }
        None => {
            writeln!(out)?;
            for (i, group) in session.groups().iter().enumerate() {
                writeln!(out, "  :g {}  {}", i + 1, group.label)?;
            }
        }
    }

    if let Some(message) = message {
        writeln!(out, "\n{}", message)?;
    }
    write!(out, "\n> ")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_commands_and_text() {
        assert_eq!(parse_input(":1"), Input::Suggestion(Side::Left));
        assert_eq!(parse_input(":g 2"), Input::OpenGroup(1));
        assert_eq!(parse_input(":p 1"), Input::InsertPhrase(0));
        assert_eq!(parse_input(":k Q"), Input::Key("Q".to_string()));
        assert_eq!(parse_input("hello I"), Input::Text("hello I".to_string()));
        assert!(matches!(parse_input(":g 0"), Input::Unknown(_)));
        assert!(matches!(parse_input(":zz"), Input::Unknown(_)));
    }

    #[test]
    fn phrases_are_fetched_fresh() {
        let dir = TempDir::new().unwrap();
        let store = PhraseStore::open_at(dir.path().join("phrases.json")).unwrap();
        let mut session = KeyboardSession::new(StringDocument::default());

        let (_, message) = apply(&mut session, Input::InsertPhrase(0), &store).unwrap();
        assert_eq!(message.as_deref(), Some("No saved phrase 1"));

        // Saved by the host app after the keyboard opened.
        store.create("Be right back").unwrap();
        let (keep_going, message) = apply(&mut session, Input::InsertPhrase(0), &store).unwrap();
        assert!(keep_going);
        assert!(message.is_none());
        assert_eq!(session.document().text(), "Be right back");
    }

    #[test]
    fn typing_drives_suggestions() {
        let dir = TempDir::new().unwrap();
        let store = PhraseStore::open_at(dir.path().join("phrases.json")).unwrap();
        let mut session = KeyboardSession::new(StringDocument::default());

        for line in [":g 3", ":k i", ":x", ":1"] {
            apply(&mut session, parse_input(line), &store).unwrap();
        }
        assert_eq!(session.document().text(), "iI'm ");

        let (keep_going, _) = apply(&mut session, parse_input(":q"), &store).unwrap();
        assert!(!keep_going);
    }
}
