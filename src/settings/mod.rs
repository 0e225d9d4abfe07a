//! Node configuration for a placement service instance.
//!
//! [`PdConfig`] is what a rendered argument list parses into. Loading is
//! layered on the `config` crate:
//! 1. Type defaults (lowest priority)
//! 2. `--key=value` flags parsed by clap (later duplicates win)
//!
//! Parsing also runs [`PdConfig::adjust`] and [`PdConfig::validate`], so a
//! config returned by [`PdConfig::from_args`] is ready to hand to a server.
mod flags;
mod member;
pub(crate) use flags::*;
pub use member::*;

#[cfg(test)]
mod member_test;

use std::iter;

use clap::Parser;
use config::Config;
use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::Error;
use crate::Result;

/// Configuration of one placement service node.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PdConfig {
    /// Human-readable member name, unique within the cluster
    #[serde(default = "default_name")]
    pub name: String,

    /// Storage directory. Empty means `default.<name>`
    #[serde(default)]
    pub data_dir: String,

    /// Comma-separated URLs to serve clients on
    #[serde(default = "default_client_urls")]
    pub client_urls: String,

    /// Client URLs announced to the cluster. Empty means `client_urls`
    #[serde(default)]
    pub advertise_client_urls: String,

    /// Comma-separated URLs to serve peer traffic on
    #[serde(default = "default_peer_urls")]
    pub peer_urls: String,

    /// Peer URLs announced to the cluster. Empty means `peer_urls`
    #[serde(default)]
    pub advertise_peer_urls: String,

    /// Bootstrap membership, `name=url[,name=url...]`
    #[serde(default)]
    pub initial_cluster: String,

    /// Peer URL of a running member to join through
    #[serde(default)]
    pub join: String,

    /// Leader lease in seconds
    #[serde(default = "default_lease")]
    pub lease: i64,

    /// Raft tick interval
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Raft election timeout, must exceed the tick interval
    #[serde(default = "default_election_interval_ms")]
    pub election_interval_ms: u64,

    /// How often the timestamp oracle persists its high watermark
    #[serde(default = "default_tso_save_interval_ms")]
    pub tso_save_interval_ms: u64,
}

impl Default for PdConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: String::new(),
            client_urls: default_client_urls(),
            advertise_client_urls: String::new(),
            peer_urls: default_peer_urls(),
            advertise_peer_urls: String::new(),
            initial_cluster: String::new(),
            join: String::new(),
            lease: default_lease(),
            tick_interval_ms: default_tick_interval_ms(),
            election_interval_ms: default_election_interval_ms(),
            tso_save_interval_ms: default_tso_save_interval_ms(),
        }
    }
}

impl PdConfig {
    /// Parses a `--key=value` argument list into an adjusted, validated config.
    ///
    /// Flags are declared with clap; only the canonical kebab-case
    /// spellings (`--data-dir`) are accepted. Flags given on the command line
    /// are layered over the type defaults; a repeated flag keeps its last value.
    ///
    /// # Errors
    /// - `Error::Args` if an argument is malformed, names an unknown flag or
    ///   carries a value of the wrong type
    /// - `Error::Config` if the merged config fails validation
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let flags = ServerFlags::try_parse_from(
            iter::once(BIN_NAME.to_string()).chain(args.into_iter().map(|a| a.as_ref().to_string())),
        )?;

        let mut config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(Config::try_from(&flags)?)
            .build()?
            .try_deserialize()?;
        config.adjust();
        debug!(name = %config.name, "parsed node config");

        config.validate()
    }

    /// Fills fields whose defaults derive from other fields.
    pub fn adjust(&mut self) {
        if self.advertise_client_urls.is_empty() {
            self.advertise_client_urls = self.client_urls.clone();
        }
        if self.advertise_peer_urls.is_empty() {
            self.advertise_peer_urls = self.peer_urls.clone();
        }
        if self.data_dir.is_empty() {
            self.data_dir = format!("default.{}", self.name);
        }
        // A lone node bootstraps a cluster of itself.
        if self.join.is_empty() && self.initial_cluster.is_empty() {
            self.initial_cluster = split_list(&self.advertise_peer_urls)
                .map(|url| Member::new(&self.name, url).to_string())
                .collect::<Vec<_>>()
                .join(",");
        }
    }

    /// Validates the config and returns it.
    ///
    /// Call after [`adjust`](Self::adjust); empty advertise URLs are
    /// reported as invalid otherwise.
    pub fn validate(self) -> Result<Self> {
        if self.name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if self.data_dir.is_empty() {
            return Err(invalid("data-dir cannot be empty"));
        }

        validate_url_list("client-urls", &self.client_urls)?;
        validate_url_list("advertise-client-urls", &self.advertise_client_urls)?;
        validate_url_list("peer-urls", &self.peer_urls)?;
        validate_url_list("advertise-peer-urls", &self.advertise_peer_urls)?;

        if self.is_joining() {
            if !self.initial_cluster.is_empty() {
                return Err(invalid("join and initial-cluster are mutually exclusive"));
            }
            validate_url("join", &self.join)?;
        } else {
            self.validate_initial_cluster()?;
        }

        if self.lease < 1 {
            return Err(invalid(format!("lease must be at least 1s, got {}", self.lease)));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick-interval-ms must be positive"));
        }
        if self.election_interval_ms <= self.tick_interval_ms {
            return Err(invalid(format!(
                "election-interval-ms ({}) must exceed tick-interval-ms ({})",
                self.election_interval_ms, self.tick_interval_ms
            )));
        }

        Ok(self)
    }

    /// True if the node joins a running cluster instead of bootstrapping one.
    pub fn is_joining(&self) -> bool {
        !self.join.is_empty()
    }

    /// Parsed `initial_cluster` entries, in order.
    pub fn initial_members(&self) -> Result<Vec<Member>> {
        parse_members(&self.initial_cluster)
    }

    fn validate_initial_cluster(&self) -> Result<()> {
        let members = self.initial_members()?;
        if members.is_empty() {
            return Err(invalid("initial-cluster must contain at least one member"));
        }

        let mut urls = std::collections::HashSet::new();
        for member in &members {
            if !urls.insert(member.peer_url.as_str()) {
                return Err(invalid(format!(
                    "Duplicate peer url {} in initial-cluster",
                    member.peer_url
                )));
            }
        }

        if !members.iter().any(|m| m.name == self.name) {
            return Err(invalid(format!(
                "Current node {} not found in initial-cluster",
                self.name
            )));
        }

        Ok(())
    }
}

pub(crate) fn invalid(msg: impl Into<String>) -> Error {
    Error::Config(ConfigError::Message(msg.into()))
}

fn default_name() -> String {
    "pd".to_string()
}
fn default_client_urls() -> String {
    "http://127.0.0.1:2379".to_string()
}
fn default_peer_urls() -> String {
    "http://127.0.0.1:2380".to_string()
}
fn default_lease() -> i64 {
    3
}
fn default_tick_interval_ms() -> u64 {
    500
}
fn default_election_interval_ms() -> u64 {
    3000
}
fn default_tso_save_interval_ms() -> u64 {
    3000
}
