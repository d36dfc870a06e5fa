use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a saved phrase. Never reused once allocated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PhraseId(pub u64);

impl fmt::Display for PhraseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub id: PhraseId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Phrase {
    pub fn new(id: PhraseId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// First line of the phrase, shortened for list rows.
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or("");
        let mut preview: String = first_line.chars().take(max_chars).collect();
        if first_line.chars().count() > max_chars || self.content.lines().nth(1).is_some() {
            preview.push('…');
        }
        preview
    }

    pub fn formatted_time(&self) -> String {
        let entry_time = self.updated_at.with_timezone(&Local);
        let duration = Local::now().signed_duration_since(entry_time);

        if duration.num_seconds() < 60 {
            format!("{}s ago", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            format!("{}d ago", duration.num_days())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_identity() {
        let mut phrase = Phrase::new(PhraseId(3), "See you soon".to_string());
        let created = phrase.created_at;
        phrase.update_content("See you later".to_string());
        assert_eq!(phrase.id, PhraseId(3));
        assert_eq!(phrase.created_at, created);
        assert_eq!(phrase.content, "See you later");
        assert!(phrase.updated_at >= created);
    }

    #[test]
    fn preview_marks_truncation() {
        let phrase = Phrase::new(PhraseId(1), "Thanks for reaching out\nBest".to_string());
        assert_eq!(phrase.preview(6), "Thanks…");
        assert_eq!(phrase.preview(100), "Thanks for reaching out…");

        let short = Phrase::new(PhraseId(2), "ok".to_string());
        assert_eq!(short.preview(10), "ok");
    }

    #[test]
    fn id_serializes_as_a_bare_number() {
        assert_eq!(serde_json::to_string(&PhraseId(42)).unwrap(), "42");
    }
}
