//! Tag input handling.
//!
//! Tags are free-form and case-sensitive: `Work` and `work` are two tags.
//! Users type them as a comma-separated list.

/// Splits comma-separated input into trimmed, non-empty tags, in input order.
///
/// ```
/// use webnote::tags::parse_tag_input;
///
/// assert_eq!(parse_tag_input(" a, b ,,c "), vec!["a", "b", "c"]);
/// assert!(parse_tag_input(" , ").is_empty());
/// ```
pub fn parse_tag_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drops repeated tags, keeping the first occurrence.
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Union of `existing` and `incoming`: existing tags first, then the new
/// ones in the order given.
pub fn merge_tags(existing: &[String], incoming: Vec<String>) -> Vec<String> {
    dedup_tags(existing.iter().cloned().chain(incoming))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_keeps_existing_first_and_first_occurrence() {
        let merged = merge_tags(&strings(&["b"]), parse_tag_input("a, b, a, c"));
        assert_eq!(merged, strings(&["b", "a", "c"]));
    }

    #[test]
    fn merge_is_case_sensitive() {
        let merged = merge_tags(&strings(&["Work"]), parse_tag_input("work,Work"));
        assert_eq!(merged, strings(&["Work", "work"]));
    }

    #[test]
    fn parse_drops_blank_entries() {
        assert_eq!(parse_tag_input("x,, ,y,"), strings(&["x", "y"]));
        assert!(parse_tag_input("").is_empty());
    }

    #[test]
    fn dedup_collapses_existing_duplicates() {
        assert_eq!(
            dedup_tags(strings(&["a", "a", "b", "a"])),
            strings(&["a", "b"])
        );
    }
}
