//! Wire models for the token and listing endpoints.
//!
//! Unknown fields are ignored everywhere so that new fields added by the
//! provider do not break decoding.

use serde::{Deserialize, Serialize};

/// Bearer token issued by the password grant. Valid for the whole run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
    pub scope: String,
    pub token_type: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub kind: String,
    pub data: ListingData,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingChild {
    pub kind: String,
    pub data: Item,
}

/// A post. `name` is the stable identity assigned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub crosspost_parent_list: Vec<Item>,
}

impl Item {
    /// The accumulated text for this item: title and body joined by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.selftext)
    }

    pub fn has_body(&self) -> bool {
        !self.selftext.is_empty()
    }
}
