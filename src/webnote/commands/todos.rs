//! The to-do list.
//!
//! To-dos are independent of notes: plain text, a priority, an optional
//! deadline and a done flag. New items go to the end of the list. Removing an
//! item needs no confirmation.
//!
//! A deadline must not lie before the current minute. The floor is taken from
//! the `now` handed in on every call, so it follows the wall clock instead of
//! being fixed when the program started.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WebnoteError};
use crate::model::{Priority, TodoItem};
use crate::state::AppState;
use crate::store::StorageBackend;
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use tracing::debug;
use uuid::Uuid;

pub const PAST_DEADLINE: &str = "Please choose a deadline in the future.";

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// `now` truncated to the minute: the earliest deadline accepted.
pub fn deadline_floor(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Parses deadline input. Blank input means "no deadline". Values without an
/// offset are read as local time.
pub fn parse_deadline(input: &str) -> Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return resolve_local(Local.from_local_datetime(&naive), input).map(Some);
        }
    }
    Err(WebnoteError::Validation(format!(
        "Invalid deadline: {} (expected YYYY-MM-DDTHH:MM)",
        input
    )))
}

// A wall-clock time repeated by a clock change resolves to its first
// occurrence. One skipped by a clock change has no instant at all.
fn resolve_local<Tz: TimeZone>(local: LocalResult<DateTime<Tz>>, input: &str) -> Result<DateTime<Utc>> {
    match local {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => Err(WebnoteError::Validation(format!(
            "Deadline {} does not exist in local time (clock change)",
            input
        ))),
    }
}

pub fn add<B: StorageBackend>(
    state: &mut AppState<B>,
    text: &str,
    priority: Priority,
    deadline: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(CmdResult::default());
    }

    let deadline = parse_deadline(deadline)?;
    if let Some(d) = deadline {
        if d < deadline_floor(now) {
            return Err(WebnoteError::Validation(PAST_DEADLINE.to_string()));
        }
    }

    let item = TodoItem::new(text.to_string(), priority, deadline);
    state.todos_mut().push(item.clone());
    state.save()?;

    let mut result = CmdResult::default().with_listed_todos(vec![item]);
    result.add_message(CmdMessage::success(format!("To-do added: {}", text)));
    Ok(result)
}

pub fn remove<B: StorageBackend>(state: &mut AppState<B>, id: Uuid) -> Result<CmdResult> {
    let todos = state.todos_mut();
    let Some(idx) = todos.iter().position(|t| t.id == id) else {
        debug!(%id, "todo remove: no such item");
        return Ok(CmdResult::default());
    };
    let removed = todos.remove(idx);
    state.save()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "To-do removed: {}",
        removed.text
    )));
    Ok(result)
}

pub fn set_done<B: StorageBackend>(
    state: &mut AppState<B>,
    id: Uuid,
    done: bool,
) -> Result<CmdResult> {
    let Some(item) = state.todos_mut().iter_mut().find(|t| t.id == id) else {
        debug!(%id, "todo toggle: no such item");
        return Ok(CmdResult::default());
    };
    item.done = done;
    let item = item.clone();
    state.save()?;

    let verb = if done { "done" } else { "not done" };
    let mut result = CmdResult::default().with_listed_todos(vec![item.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Marked {}: {}",
        verb, item.text
    )));
    Ok(result)
}

pub fn list<B: StorageBackend>(state: &AppState<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_todos(state.todos().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn state() -> AppState<MemBackend> {
        AppState::open(MemBackend::new()).unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn past_deadline_is_rejected() {
        let mut state = state();
        let err = add(&mut state, "Pay rent", Priority::High, "2000-01-01T00:00", Utc::now());
        assert!(matches!(err, Err(WebnoteError::Validation(ref m)) if m == PAST_DEADLINE));
        assert!(state.todos().is_empty());
    }

    #[test]
    fn no_deadline_appends_one_open_item() {
        let mut state = state();
        add(&mut state, "Pay rent", Priority::High, "", Utc::now()).unwrap();
        assert_eq!(state.todos().len(), 1);
        assert!(!state.todos()[0].done);
        assert_eq!(state.todos()[0].deadline, None);
        assert_eq!(state.todos()[0].priority, Priority::High);
    }

    #[test]
    fn current_minute_is_still_allowed() {
        let mut state = state();
        let now = at("2030-05-01T10:15:42Z");
        add(&mut state, "a", Priority::Low, "2030-05-01T10:15:00Z", now).unwrap();
        let err = add(&mut state, "b", Priority::Low, "2030-05-01T10:14:59Z", now);
        assert!(err.is_err());
        assert_eq!(state.todos().len(), 1);
    }

    #[test]
    fn floor_tracks_the_clock() {
        let mut state = state();
        let deadline = "2030-05-01T10:15:00Z";
        add(&mut state, "early", Priority::Low, deadline, at("2030-05-01T10:15:30Z")).unwrap();
        assert!(add(&mut state, "late", Priority::Low, deadline, at("2030-05-01T10:16:00Z")).is_err());
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut state = state();
        assert!(add(&mut state, "   ", Priority::Low, "", Utc::now())
            .unwrap()
            .is_noop());
        assert!(state.todos().is_empty());
    }

    #[test]
    fn garbage_deadline_is_a_validation_error() {
        let mut state = state();
        let err = add(&mut state, "x", Priority::Low, "next tuesday", Utc::now());
        assert!(matches!(err, Err(WebnoteError::Validation(_))));
    }

    #[test]
    fn appends_oldest_first_and_removes_by_identity() {
        let mut state = state();
        add(&mut state, "one", Priority::Low, "", Utc::now()).unwrap();
        add(&mut state, "two", Priority::Low, "", Utc::now()).unwrap();
        add(&mut state, "two", Priority::Low, "", Utc::now()).unwrap();
        let second = state.todos()[1].id;

        remove(&mut state, second).unwrap();
        let texts: Vec<_> = state.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_ne!(state.todos()[1].id, second);
    }

    #[test]
    fn toggling_done_persists() {
        let mut state = state();
        add(&mut state, "one", Priority::Low, "", Utc::now()).unwrap();
        let id = state.todos()[0].id;
        set_done(&mut state, id, true).unwrap();
        assert!(state.todos()[0].done);

        let raw = state
            .store()
            .backend()
            .read(crate::store::record_store::TODOS_KEY)
            .unwrap()
            .unwrap();
        let saved: Vec<TodoItem> = serde_json::from_str(&raw).unwrap();
        assert!(saved[0].done);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut state = state();
        assert!(remove(&mut state, Uuid::new_v4()).unwrap().is_noop());
        assert!(set_done(&mut state, Uuid::new_v4(), true).unwrap().is_noop());
    }

    #[test]
    fn skipped_local_time_names_the_clock_change() {
        let err = resolve_local(LocalResult::<DateTime<Utc>>::None, "2030-03-31T02:30").unwrap_err();
        assert!(matches!(
            err,
            WebnoteError::Validation(ref m)
                if m == "Deadline 2030-03-31T02:30 does not exist in local time (clock change)"
        ));
    }

    #[test]
    fn repeated_local_time_takes_first_occurrence() {
        let summer = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let winter = chrono::FixedOffset::east_opt(3600).unwrap();
        let first = summer.with_ymd_and_hms(2030, 10, 27, 2, 30, 0).unwrap();
        let second = winter.with_ymd_and_hms(2030, 10, 27, 2, 30, 0).unwrap();

        let resolved = resolve_local(LocalResult::Ambiguous(first, second), "x").unwrap();
        assert_eq!(resolved, at("2030-10-27T00:30:00Z"));
    }

    #[test]
    fn local_formats_parse() {
        assert!(parse_deadline("2031-02-03T04:05").unwrap().is_some());
        assert!(parse_deadline("2031-02-03T04:05:06").unwrap().is_some());
        assert!(parse_deadline(" ").unwrap().is_none());
    }
}
