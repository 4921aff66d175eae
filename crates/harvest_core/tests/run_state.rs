use std::collections::HashSet;

use harvest_core::{DecodeError, DriverState, Item, PageResult, RunState};
use pretty_assertions::assert_eq;

fn accepted(pairs: &[(&str, &str)], cursor: &str) -> PageResult {
    PageResult {
        next_cursor: cursor.to_string(),
        accepted_bodies: pairs.iter().map(|(_, body)| body.to_string()).collect(),
        new_identities: pairs.iter().map(|(id, _)| id.to_string()).collect::<HashSet<_>>(),
        error: None,
    }
}

fn decode_failure() -> DecodeError {
    DecodeError {
        message: "expected value".to_string(),
        line: 1,
        column: 1,
    }
}

fn named(name: &str) -> Item {
    Item {
        name: name.to_string(),
        ..Item::default()
    }
}

#[test]
fn merge_advances_cursor_and_records_identities() {
    let mut run = RunState::new(10);
    let next = run.merge(accepted(&[("a", "A"), ("b", "B")], "b"));
    assert_eq!(next, DriverState::Paging);
    assert_eq!(run.cursor(), "b");
    assert_eq!(run.accumulated(), &["A".to_string(), "B".to_string()]);
    assert!(!run.is_new(&named("a")));
    assert!(run.is_new(&named("c")));
    assert_eq!(run.seen_count(), 2);
}

#[test]
fn failed_page_keeps_cursor_and_keeps_paging() {
    let mut run = RunState::new(10);
    run.merge(accepted(&[("a", "A")], "a"));
    let next = run.merge(PageResult::failed(decode_failure()));
    assert_eq!(next, DriverState::Paging);
    assert_eq!(run.cursor(), "a");
    assert_eq!(run.pages_read(), 2);
}

#[test]
fn page_without_accepted_items_finishes() {
    let mut run = RunState::new(10);
    run.merge(accepted(&[("a", "A")], "a"));
    let next = run.merge(accepted(&[], "z"));
    assert_eq!(next, DriverState::Done);
    assert_eq!(run.cursor(), "z");
}

#[test]
fn reaching_target_finishes_without_truncating() {
    let mut run = RunState::new(2);
    let next = run.merge(accepted(&[("a", "A"), ("b", "B"), ("c", "C")], "c"));
    assert_eq!(next, DriverState::Done);
    assert_eq!(run.into_accumulated().len(), 3);
}

#[test]
fn target_reached_wins_over_error() {
    let mut run = RunState::new(1);
    run.merge(accepted(&[("a", "A")], "a"));
    assert_eq!(run.merge(PageResult::failed(decode_failure())), DriverState::Done);
}
