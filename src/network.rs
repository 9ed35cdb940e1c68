//! # Network Registry
//!
//! The fixed set of networks a validator can be steered towards, plus the
//! name normalization used for every lookup coming from the outside
//! (query strings, selection events, config files).
//!
//! - Display names are upper-case (`"COSMOS HUB"`), matching the metric files.
//! - Slugs name the per-network metric table (`cosmos_hub.csv`).
//! - Lookups ignore case, dashes, underscores and repeated whitespace.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One network the engine knows how to fetch and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Display name, e.g. `"GRAVITY BRIDGE"`.
    pub name: String,
    /// File slug, e.g. `"gravity_bridge"`. Derived from `name` when omitted.
    #[serde(default)]
    pub slug: String,
}

impl NetworkSpec {
    pub fn new(name: &str) -> Self {
        let name = display_name(name);
        let slug = slug_for(&name);
        Self { name, slug }
    }

    /// Fill in a missing slug and canonicalize the display name.
    pub fn normalized(mut self) -> Self {
        self.name = display_name(&self.name);
        if self.slug.trim().is_empty() {
            self.slug = slug_for(&self.name);
        }
        self
    }
}

/// The 29 networks of the reference deployment.
pub const REFERENCE_NETWORKS: [&str; 29] = [
    "COSMOS HUB",
    "ATOMONE",
    "OSMOSIS",
    "AKASH",
    "AGORIC",
    "ALTHEA",
    "ARCHWAY",
    "AXELAR",
    "BAND",
    "CELESTIA",
    "CHIHUAHUA",
    "COREUM",
    "DYDX",
    "GRAVITY BRIDGE",
    "HUMANS",
    "INJECTIVE",
    "KAVA",
    "MANTRA",
    "MEDIBLOC",
    "MILKYWAY",
    "NILLION",
    "PERSISTENCE",
    "REGEN",
    "SECRET",
    "SHENTU",
    "STARGAZE",
    "TERRA",
    "XION",
    "XPLA",
];

/// Built-in registry, used when no network list is configured.
pub fn reference_registry() -> Vec<NetworkSpec> {
    REFERENCE_NETWORKS.iter().map(|n| NetworkSpec::new(n)).collect()
}

/// Lookup key: lowercase, separators folded to single spaces.
pub fn normalize_name(s: &str) -> String {
    static RE_SEP: OnceCell<Regex> = OnceCell::new();
    let re = RE_SEP.get_or_init(|| Regex::new(r"[\s_\-]+").expect("separator regex"));
    re.replace_all(s.trim(), " ").to_lowercase()
}

/// Canonical display form: normalized and upper-cased.
pub fn display_name(s: &str) -> String {
    normalize_name(s).to_uppercase()
}

/// `"GRAVITY BRIDGE"` → `"gravity_bridge"`.
pub fn slug_for(name: &str) -> String {
    normalize_name(name).replace(' ', "_")
}

/// Case/separator-insensitive name equality.
pub fn same_network(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_all_reference_networks() {
        let reg = reference_registry();
        assert_eq!(reg.len(), 29);
        let hub = reg.iter().find(|n| n.name == "COSMOS HUB").unwrap();
        assert_eq!(hub.slug, "cosmos_hub");
    }

    #[test]
    fn lookups_ignore_case_and_separators() {
        assert!(same_network("Gravity-Bridge", "GRAVITY BRIDGE"));
        assert!(same_network("  cosmos_hub ", "COSMOS HUB"));
        assert!(!same_network("osmosis", "akash"));
    }

    #[test]
    fn normalized_fills_missing_slug() {
        let spec = NetworkSpec {
            name: "cosmos  hub".into(),
            slug: String::new(),
        }
        .normalized();
        assert_eq!(spec.name, "COSMOS HUB");
        assert_eq!(spec.slug, "cosmos_hub");
    }
}
