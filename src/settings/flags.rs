use clap::Parser;
use serde::Serialize;

/// Program name clap expects in front of the flags.
pub(crate) const BIN_NAME: &str = "pd-server";

/// Command-line flags of a placement service node.
///
/// Every flag is optional; flags left out fall back to the
/// [`PdConfig`](super::PdConfig) defaults when the two are layered.
#[derive(Parser, Serialize, Debug, Clone)]
#[command(name = BIN_NAME, args_override_self = true)]
pub(crate) struct ServerFlags {
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_urls: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertise_client_urls: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_urls: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertise_peer_urls: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_cluster: Option<String>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,

    /// Leader lease in seconds
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease: Option<i64>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_interval_ms: Option<u64>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub election_interval_ms: Option<u64>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tso_save_interval_ms: Option<u64>,
}
