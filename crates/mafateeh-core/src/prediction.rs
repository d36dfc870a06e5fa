/// Which slot of the two-word suggestion bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The pair of words shown above the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestions {
    pub left: &'static str,
    pub right: &'static str,
}

impl Suggestions {
    pub const fn new(left: &'static str, right: &'static str) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: Side) -> &'static str {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Text inserted when a suggestion is tapped: the word and one space.
    pub fn text_to_insert(&self, side: Side) -> String {
        format!("{} ", self.get(side))
    }

    pub fn as_tuple(&self) -> (&'static str, &'static str) {
        (self.left, self.right)
    }
}

/// Shown before anything has been typed.
pub const DEFAULT_SUGGESTIONS: Suggestions = Suggestions::new("I", "We");
/// Shown when the last word has no table entry.
pub const FALLBACK_SUGGESTIONS: Suggestions = Suggestions::new("I", "The");

const COMPLETIONS: &[(&str, Suggestions)] = &[
    ("i", Suggestions::new("I'm", "is")),
    ("h", Suggestions::new("hi", "hello")),
    ("you", Suggestions::new("are", "will")),
    ("we", Suggestions::new("are", "can")),
    ("he", Suggestions::new("is", "was")),
    ("she", Suggestions::new("is", "was")),
    ("it", Suggestions::new("is", "will")),
];

/// Static next-word lookup keyed on the last typed word.
///
/// Pure and allocation-light; safe to call on every keystroke.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionEngine;

impl PredictionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Suggestions for the text before the cursor.
    ///
    /// `None` and `""` give [`DEFAULT_SUGGESTIONS`]. Whitespace-only text has
    /// no last word and gives [`FALLBACK_SUGGESTIONS`].
    pub fn predict(&self, context: Option<&str>) -> Suggestions {
        let context = match context {
            Some(context) if !context.is_empty() => context,
            _ => return DEFAULT_SUGGESTIONS,
        };

        let last_word = last_word(context).to_lowercase();
        COMPLETIONS
            .iter()
            .find(|(word, _)| *word == last_word)
            .map(|(_, suggestions)| *suggestions)
            .unwrap_or(FALLBACK_SUGGESTIONS)
    }
}

/// Convenience wrapper over [`PredictionEngine::predict`].
pub fn predict(context: &str) -> Suggestions {
    PredictionEngine.predict(Some(context))
}

fn last_word(context: &str) -> &str {
    context.split_whitespace().next_back().unwrap_or("")
}
