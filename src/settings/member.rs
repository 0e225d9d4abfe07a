use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::invalid;
use crate::Result;

/// One `name=peer_url` entry of a membership string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub peer_url: String,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        peer_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            peer_url: peer_url.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}={}", self.name, self.peer_url)
    }
}

/// Joins members into `name1=url1,name2=url2`, preserving order.
pub fn membership_string<'a>(members: impl IntoIterator<Item = &'a Member>) -> String {
    members
        .into_iter()
        .map(Member::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a membership string. An empty string yields no members.
///
/// A name may appear more than once when a member listens on several peer
/// URLs.
pub fn parse_members(membership: &str) -> Result<Vec<Member>> {
    split_list(membership)
        .map(|entry| {
            let (name, url) = entry.split_once('=').ok_or_else(|| {
                invalid(format!("initial-cluster entry {entry:?} must be name=url"))
            })?;
            if name.is_empty() {
                return Err(invalid(format!(
                    "initial-cluster entry {entry:?} has an empty name"
                )));
            }
            validate_url("initial-cluster", url)?;
            Ok(Member::new(name, url))
        })
        .collect()
}

/// Non-empty, trimmed entries of a comma-separated list.
pub(crate) fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts `http://host:port` or `https://host:port` with a non-zero port.
pub(crate) fn validate_url(
    field: &str,
    url: &str,
) -> Result<()> {
    let authority = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| invalid(format!("{field}: url {url:?} must use http or https")))?;

    let (host, port) = authority
        .rsplit_once(':')
        .ok_or_else(|| invalid(format!("{field}: url {url:?} is missing a port")))?;

    if host.is_empty() || host.contains('/') {
        return Err(invalid(format!("{field}: url {url:?} has an invalid host")));
    }
    match port.parse::<u16>() {
        Ok(p) if p != 0 => Ok(()),
        _ => Err(invalid(format!("{field}: url {url:?} has an invalid port"))),
    }
}

pub(crate) fn validate_url_list(
    field: &str,
    list: &str,
) -> Result<()> {
    let mut count = 0;
    for url in split_list(list) {
        validate_url(field, url)?;
        count += 1;
    }
    if count == 0 {
        return Err(invalid(format!("{field} cannot be empty")));
    }
    Ok(())
}
