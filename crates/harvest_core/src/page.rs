use std::collections::HashSet;

use crate::{Item, ListingPage};

/// A response body that could not be decoded into the expected model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to decode response at line {line} column {column}: {message}")]
pub struct DecodeError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Decode a listing body, ignoring fields the model does not know about.
pub fn decode_listing(body: &str) -> Result<ListingPage, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

/// Outcome of reading one listing page.
///
/// On error the cursor is empty and nothing was accepted; the caller keeps
/// its previous cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub next_cursor: String,
    pub accepted_bodies: Vec<String>,
    pub new_identities: HashSet<String>,
    pub error: Option<DecodeError>,
}

impl PageResult {
    pub fn failed(error: DecodeError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Flatten a decoded page into accepted texts.
///
/// Every top-level item is checked, then its cross-posted parents depth
/// first, all against one per-page identity set. Items without body text are
/// skipped before `is_accepted` is consulted.
pub fn collect_page<F>(page: &ListingPage, mut is_accepted: F) -> PageResult
where
    F: FnMut(&Item) -> bool,
{
    let mut result = PageResult::default();
    for child in &page.data.children {
        visit(&child.data, &mut is_accepted, &mut result);
    }
    result.next_cursor = page
        .data
        .children
        .last()
        .map(|child| child.data.name.clone())
        .unwrap_or_default();
    result
}

fn visit<F>(item: &Item, is_accepted: &mut F, result: &mut PageResult)
where
    F: FnMut(&Item) -> bool,
{
    if item.has_body() && !result.new_identities.contains(&item.name) && is_accepted(item) {
        result.accepted_bodies.push(item.text());
        result.new_identities.insert(item.name.clone());
    }
    for parent in &item.crosspost_parent_list {
        visit(parent, is_accepted, result);
    }
}
