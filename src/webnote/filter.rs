//! Read-only views over the note collection.
//!
//! Two independent filters exist:
//!
//! - **Text**: case-insensitive substring match on the title or the content.
//!   Content is matched as stored markup, so a query like `strong` also hits
//!   `<strong>` tags.
//! - **Tags**: the query is a comma-separated list of tokens. A note matches
//!   when every token is a case-insensitive substring of at least one of its
//!   tags.
//!
//! Blank queries match everything. [`NoteFilter`] applies both (AND).

use crate::model::Note;
use crate::tags::parse_tag_input;

pub fn matches_text(note: &Note, query: &str) -> bool {
    let q = query.to_lowercase();
    if q.is_empty() {
        return true;
    }
    note.title.to_lowercase().contains(&q) || note.content.to_lowercase().contains(&q)
}

pub fn matches_tags(note: &Note, query: &str) -> bool {
    let tokens = parse_tag_input(&query.to_lowercase());
    if tokens.is_empty() {
        return true;
    }
    let tags: Vec<String> = note.tags.iter().map(|t| t.to_lowercase()).collect();
    tokens
        .iter()
        .all(|tok| tags.iter().any(|tag| tag.contains(tok.as_str())))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub text: Option<String>,
    pub tags: Option<String>,
}

impl NoteFilter {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            text: Some(query.into()),
            tags: None,
        }
    }

    pub fn tags(query: impl Into<String>) -> Self {
        Self {
            text: None,
            tags: Some(query.into()),
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.text.as_deref().map_or(true, |q| matches_text(note, q))
            && self.tags.as_deref().map_or(true, |q| matches_tags(note, q))
    }

    /// The matching notes, in collection order.
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NoteId, Priority};

    fn note(title: &str, content: &str, tags: &[&str]) -> Note {
        let mut n = Note::new(NoteId(1), Priority::Medium);
        n.title = title.into();
        n.content = content.into();
        n.tags = tags.iter().map(|t| t.to_string()).collect();
        n
    }

    #[test]
    fn tag_tokens_are_anded() {
        let both = note("a", "", &["xyz", "yellow"]);
        let one = note("b", "", &["xyz"]);
        assert!(matches_tags(&both, "x,y"));
        assert!(!matches_tags(&one, "x, ,q"));
        assert!(!matches_tags(&one, "x,w"));
    }

    #[test]
    fn substring_rule_wins_over_whole_tag_reading() {
        // Each token may be satisfied by the same tag.
        let one = note("b", "", &["xyz"]);
        assert!(matches_tags(&one, "x,y"));
        assert!(matches_tags(&one, "xy,yz,z"));
    }

    #[test]
    fn tag_matching_ignores_case() {
        let n = note("a", "", &["Work"]);
        assert!(matches_tags(&n, "WOR"));
    }

    #[test]
    fn blank_queries_match_everything() {
        let n = note("a", "", &[]);
        assert!(matches_tags(&n, " , "));
        assert!(matches_text(&n, ""));
        assert!(NoteFilter::default().matches(&n));
    }

    #[test]
    fn text_matches_title_or_markup() {
        let n = note("Shopping", "<p><strong>Milk</strong></p>", &[]);
        assert!(matches_text(&n, "shop"));
        assert!(matches_text(&n, "milk"));
        assert!(matches_text(&n, "strong"));
        assert!(!matches_text(&n, "bread"));
    }

    #[test]
    fn combined_filter_requires_both() {
        let notes = vec![
            note("Rent", "", &["home"]),
            note("Rent invoice", "", &["work"]),
            note("Trip", "", &["home"]),
        ];
        let filter = NoteFilter {
            text: Some("rent".into()),
            tags: Some("home".into()),
        };
        let hits = filter.apply(&notes);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Rent");
    }
}
