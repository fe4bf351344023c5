//! Application and resolver configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recursion limit observed by the desktop application.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Text substituted for a reference that would re-enter the chain being expanded.
pub const SELF_REFERENCE_MARKER: &str = "[Self-reference skipped]";

/// How the resolver recognises a reference back into the active expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDetection {
    /// Only a chain referencing itself directly is short-circuited.
    /// Longer cycles run until the depth cap truncates them.
    #[default]
    SelfOnly,
    /// Any chain already on the active expansion stack is short-circuited.
    Ancestors,
}

/// Tuning knobs for [`ChainResolver`](crate::resolve::ChainResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Deepest nesting level that is still expanded.
    pub max_depth: usize,
    pub cycle_detection: CycleDetection,
    pub self_reference_marker: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_detection: CycleDetection::default(),
            self_reference_marker: SELF_REFERENCE_MARKER.to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the default chain library location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains_file: Option<PathBuf>,
    /// Default tracing filter when `SNIPCHAIN_LOG` is unset.
    pub log_level: String,
    pub resolver: ResolverConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chains_file: None,
            log_level: "warn".to_string(),
            resolver: ResolverConfig::default(),
        }
    }
}
