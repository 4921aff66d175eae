use std::collections::HashSet;

use crate::{Item, PageResult};

/// Lifecycle of one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Authenticating,
    Paging,
    Done,
    Aborted,
}

/// Run-scoped accumulation: seen identities, accepted texts and the cursor.
///
/// Owned by the driver; page reads only see it through [`RunState::is_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    target: usize,
    seen: HashSet<String>,
    accumulated: Vec<String>,
    cursor: String,
    pages_read: usize,
}

impl RunState {
    pub fn new(target: usize) -> Self {
        Self {
            target,
            seen: HashSet::new(),
            accumulated: Vec::new(),
            cursor: String::new(),
            pages_read: 0,
        }
    }

    /// Acceptance predicate handed to page reads.
    pub fn is_new(&self, item: &Item) -> bool {
        !self.seen.contains(&item.name)
    }

    /// Fold one page into the run and decide what comes next.
    ///
    /// A failed page leaves the cursor where it was and keeps the run in
    /// `Paging`, so the same page is requested again.
    pub fn merge(&mut self, page: PageResult) -> DriverState {
        self.pages_read += 1;
        let errored = page.is_error();
        let accepted_any = !page.accepted_bodies.is_empty();

        self.accumulated.extend(page.accepted_bodies);
        self.seen.extend(page.new_identities);
        if !errored {
            self.cursor = page.next_cursor;
        }

        if self.accumulated.len() < self.target && (accepted_any || errored) {
            DriverState::Paging
        } else {
            DriverState::Done
        }
    }

    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    pub fn accumulated(&self) -> &[String] {
        &self.accumulated
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn into_accumulated(self) -> Vec<String> {
        self.accumulated
    }
}
