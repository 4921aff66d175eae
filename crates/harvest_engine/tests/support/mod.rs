#![allow(dead_code)]

use harvest_core::Credentials;
use harvest_engine::{build_client, Endpoints, HttpSettings, RequestRetrier};
use serde_json::{json, Value};

pub fn init_logging() {
    harvest_logging::initialize_for_tests();
}

pub fn credentials(extra: &[(&'static str, &'static str)]) -> Credentials {
    let mut props = vec![
        ("reddit.username", "user"),
        ("reddit.password", "pass"),
        ("reddit.app_id", "id"),
        ("reddit.app_secret", "secret"),
        ("reddit.read.subreddit", "rust"),
    ];
    props.extend_from_slice(extra);
    Credentials::from_properties(props).unwrap()
}

pub fn retrier() -> RequestRetrier {
    RequestRetrier::new(build_client(&HttpSettings::default()).unwrap())
}

pub fn endpoints(uri: &str) -> Endpoints {
    Endpoints::single(uri)
}

pub fn token_json() -> Value {
    json!({
        "access_token": "tok",
        "expires_in": 86400,
        "scope": "*",
        "token_type": "bearer"
    })
}

/// A post as the listing endpoint returns it.
pub fn post(name: &str, body: &str, parents: Vec<Value>) -> Value {
    json!({
        "name": name,
        "title": format!("T{name}"),
        "selftext": body,
        "score": 1,
        "crosspost_parent_list": parents
    })
}

pub fn listing(posts: Vec<Value>) -> Value {
    let after = posts
        .last()
        .and_then(|p| p.get("name"))
        .cloned()
        .unwrap_or(Value::Null);
    json!({
        "kind": "Listing",
        "data": {
            "after": after,
            "before": null,
            "dist": posts.len(),
            "children": posts
                .into_iter()
                .map(|data| json!({"kind": "t3", "data": data}))
                .collect::<Vec<_>>()
        }
    })
}
