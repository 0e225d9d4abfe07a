//! Post-parse config hooks.
//!
//! Hooks run in the order given, each seeing the config left by the
//! previous one. When two hooks touch the same field the later one wins;
//! nothing detects or merges conflicts.

use crate::PdConfig;

/// Mutates a parsed config. The second argument is the node's name.
pub type ConfigOption = Box<dyn Fn(&mut PdConfig, &str) + Send + Sync>;

/// Boxes a closure as a [`ConfigOption`].
pub fn option<F>(f: F) -> ConfigOption
where
    F: Fn(&mut PdConfig, &str) + Send + Sync + 'static,
{
    Box::new(f)
}

/// Runs `opt` only when rendering the node called `name`.
pub fn for_node(
    name: impl Into<String>,
    opt: ConfigOption,
) -> ConfigOption {
    let target = name.into();
    option(move |config, node| {
        if node == target {
            opt(config, node);
        }
    })
}

pub fn with_lease(secs: i64) -> ConfigOption {
    option(move |config, _| config.lease = secs)
}

pub fn with_tick_interval(ms: u64) -> ConfigOption {
    option(move |config, _| config.tick_interval_ms = ms)
}

pub fn with_election_interval(ms: u64) -> ConfigOption {
    option(move |config, _| config.election_interval_ms = ms)
}

pub fn with_tso_save_interval(ms: u64) -> ConfigOption {
    option(move |config, _| config.tso_save_interval_ms = ms)
}

/// Applies `options` to `config` in order.
pub(crate) fn apply_options(
    config: &mut PdConfig,
    name: &str,
    options: &[ConfigOption],
) {
    for opt in options {
        opt(config, name);
    }
}
