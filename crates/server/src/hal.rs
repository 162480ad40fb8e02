//! Minimal HATEOAS helpers: typed `_links` members for resource responses.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct Link {
    pub href: String,
}

pub type Links = BTreeMap<&'static str, Link>;

/// A `_links` object holding only a `self` relation.
pub fn self_links(href: String) -> Links {
    BTreeMap::from([("self", Link { href })])
}
