use crate::clipboard::ClipboardSource;
use crate::error::Result;
use crate::layout::{key_groups, Case, EnlargedTemplate, KeyGroup};
use crate::models::Phrase;
use crate::prediction::{PredictionEngine, Side, Suggestions};
use tracing::debug;

/// The text field the keyboard is typing into.
pub trait TextDocument {
    fn insert_text(&mut self, text: &str);
    fn delete_backward(&mut self);
    /// Text before the cursor, `None` when the host does not expose it.
    fn context_before_input(&self) -> Option<&str>;
}

/// A document that is just a string with the cursor at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringDocument {
    text: String,
}

impl StringDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextDocument for StringDocument {
    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self) {
        self.text.pop();
    }

    fn context_before_input(&self) -> Option<&str> {
        Some(&self.text)
    }
}

/// State of the keyboard surface between keystrokes.
pub struct KeyboardSession<D: TextDocument> {
    document: D,
    engine: PredictionEngine,
    case: Case,
    enlarged: Option<KeyGroup>,
    suggestions: Suggestions,
}

impl<D: TextDocument> KeyboardSession<D> {
    pub fn new(document: D) -> Self {
        let engine = PredictionEngine::new();
        let suggestions = engine.predict(document.context_before_input());
        Self {
            document,
            engine,
            case: Case::Lower,
            enlarged: None,
            suggestions,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn case(&self) -> Case {
        self.case
    }

    pub fn suggestions(&self) -> Suggestions {
        self.suggestions
    }

    /// Key groups for the current shift state.
    pub fn groups(&self) -> Vec<KeyGroup> {
        key_groups(self.case)
    }

    pub fn enlarged(&self) -> Option<&KeyGroup> {
        self.enlarged.as_ref()
    }

    pub fn enlarged_template(&self) -> Option<EnlargedTemplate> {
        self.enlarged
            .as_ref()
            .map(|group| EnlargedTemplate::for_keys(&group.keys))
    }

    /// Open the enlarged popover for a group. Returns false for an unknown index.
    pub fn open_group(&mut self, index: usize) -> bool {
        match self.groups().into_iter().nth(index) {
            Some(group) => {
                debug!(label = %group.label, "opened key group");
                self.enlarged = Some(group);
                true
            }
            None => false,
        }
    }

    pub fn close_enlarged(&mut self) {
        self.enlarged = None;
    }

    /// Type one key from the open popover. The popover stays open.
    pub fn press_key(&mut self, key: &str) -> bool {
        let known = self
            .enlarged
            .as_ref()
            .is_some_and(|group| group.keys.iter().any(|k| k == key));
        if known {
            self.insert(key);
        }
        known
    }

    /// Flip shift. An open popover switches case with the rest of the layout.
    pub fn toggle_shift(&mut self) {
        self.case = self.case.toggled();
        if let Some(open) = self.enlarged.take() {
            self.enlarged = self
                .groups()
                .into_iter()
                .find(|group| group.label.to_lowercase() == open.label.to_lowercase());
        }
    }

    pub fn backspace(&mut self) {
        self.document.delete_backward();
        self.refresh_suggestions();
    }

    pub fn space(&mut self) {
        self.insert(" ");
    }

    pub fn return_key(&mut self) {
        self.insert("\n");
    }

    pub fn numbers(&mut self) {
        self.insert("123");
    }

    pub fn symbols(&mut self) {
        self.insert("#+=");
    }

    pub fn accept_suggestion(&mut self, side: Side) {
        let text = self.suggestions.text_to_insert(side);
        self.insert(&text);
    }

    /// Paste clipboard text. An empty clipboard inserts nothing.
    pub fn paste_from(&mut self, clipboard: &mut impl ClipboardSource) -> Result<bool> {
        match clipboard.text()? {
            Some(text) if !text.is_empty() => {
                self.insert(&text);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn insert_phrase(&mut self, phrase: &Phrase) {
        self.insert(&phrase.content);
    }

    /// Insert text typed outside the layout, e.g. from a hardware keyboard.
    pub fn insert_text(&mut self, text: &str) {
        self.insert(text);
    }

    fn insert(&mut self, text: &str) {
        self.document.insert_text(text);
        self.refresh_suggestions();
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = self.engine.predict(self.document.context_before_input());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::StaticClipboard;
    use crate::models::PhraseId;

    fn session() -> KeyboardSession<StringDocument> {
        KeyboardSession::new(StringDocument::default())
    }

    #[test]
    fn starts_with_default_suggestions() {
        assert_eq!(session().suggestions().as_tuple(), ("I", "We"));
    }

    #[test]
    fn typing_in_a_group_keeps_the_popover_open() {
        let mut session = session();
        assert!(session.open_group(2));
        assert!(session.press_key("i"));
        assert!(session.enlarged().is_some());
        assert_eq!(session.document().text(), "i");
        assert_eq!(session.suggestions().as_tuple(), ("I'm", "is"));

        assert!(!session.press_key("z"));
        session.close_enlarged();
        assert!(!session.press_key("i"));
        assert_eq!(session.document().text(), "i");
    }

    #[test]
    fn unknown_group_index_is_ignored() {
        let mut session = session();
        assert!(!session.open_group(4));
        assert!(session.enlarged().is_none());
    }

    #[test]
    fn shift_switches_the_open_group() {
        let mut session = session();
        session.open_group(1);
        session.toggle_shift();
        assert_eq!(session.case(), Case::Upper);
        assert!(session.press_key("H"));
        assert!(!session.press_key("h"));
        assert_eq!(
            session.enlarged_template().unwrap().bottom,
            ["F", "G", "H"]
        );
        assert_eq!(session.suggestions().as_tuple(), ("hi", "hello"));
    }

    #[test]
    fn suggestions_follow_every_edit() {
        let mut session = KeyboardSession::new(StringDocument::new("they we "));
        assert_eq!(session.suggestions().as_tuple(), ("are", "can"));

        session.accept_suggestion(Side::Right);
        assert_eq!(session.document().text(), "they we can ");
        assert_eq!(session.suggestions().as_tuple(), ("I", "The"));

        for _ in 0..5 {
            session.backspace();
        }
        assert_eq!(session.document().text(), "they we");
        assert_eq!(session.suggestions().as_tuple(), ("are", "can"));
    }

    #[test]
    fn accepted_suggestion_is_inserted_without_a_leading_space() {
        let mut session = KeyboardSession::new(StringDocument::new("they we"));
        session.accept_suggestion(Side::Left);
        assert_eq!(session.document().text(), "they weare ");
    }

    #[test]
    fn whitespace_keys_and_shortcuts_insert_text() {
        let mut session = session();
        session.numbers();
        session.space();
        session.symbols();
        session.return_key();
        assert_eq!(session.document().text(), "123 #+=\n");
        assert_eq!(session.suggestions().as_tuple(), ("I", "The"));
    }

    #[test]
    fn paste_and_phrases_insert_their_text() {
        let mut session = session();
        assert!(!session.paste_from(&mut StaticClipboard(None)).unwrap());
        assert!(!session
            .paste_from(&mut StaticClipboard(Some(String::new())))
            .unwrap());
        assert!(session
            .paste_from(&mut StaticClipboard(Some("Hello ".to_string())))
            .unwrap());

        let phrase = Phrase::new(PhraseId(1), "See you soon".to_string());
        session.insert_phrase(&phrase);
        assert_eq!(session.into_document().text(), "Hello See you soon");
    }
}
