// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::network::{normalize_name, reference_registry, NetworkSpec};

pub const ENV_NETWORKS_PATH: &str = "VALIDSCOPE_NETWORKS_PATH";

/// Load a network list from an explicit path. Supports TOML or JSON formats.
pub fn load_networks_from(path: &Path) -> Result<Vec<NetworkSpec>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading network list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_networks(&content, ext.as_str())
}

/// Load the network list using env var + fallbacks:
/// 1) $VALIDSCOPE_NETWORKS_PATH
/// 2) config/networks.toml
/// 3) config/networks.json
/// 4) built-in reference registry
pub fn load_networks_default() -> Result<Vec<NetworkSpec>> {
    if let Ok(p) = std::env::var(ENV_NETWORKS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_networks_from(&pb);
        } else {
            return Err(anyhow!("{ENV_NETWORKS_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/networks.toml");
    if toml_p.exists() {
        return load_networks_from(&toml_p);
    }
    let json_p = PathBuf::from("config/networks.json");
    if json_p.exists() {
        return load_networks_from(&json_p);
    }
    Ok(reference_registry())
}

fn parse_networks(s: &str, hint_ext: &str) -> Result<Vec<NetworkSpec>> {
    let try_toml = hint_ext == "toml" || s.contains("networks");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported network list format"))
}

/// Entries are either bare names or `{ name, slug }` tables.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Entry {
    Name(String),
    Spec(NetworkSpec),
}

impl Entry {
    fn into_spec(self) -> NetworkSpec {
        match self {
            Entry::Name(n) => NetworkSpec::new(&n),
            Entry::Spec(s) => s.normalized(),
        }
    }
}

fn parse_toml(s: &str) -> Result<Vec<NetworkSpec>> {
    #[derive(serde::Deserialize)]
    struct TomlNetworks {
        networks: Vec<Entry>,
    }
    let v: TomlNetworks = toml::from_str(s)?;
    Ok(clean_list(v.networks))
}

fn parse_json(s: &str) -> Result<Vec<NetworkSpec>> {
    let v: Vec<Entry> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Drop blank names and duplicates (first occurrence wins, order kept).
fn clean_list(items: Vec<Entry>) -> Vec<NetworkSpec> {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Entry::into_spec)
        .filter(|spec| !spec.name.is_empty())
        .filter(|spec| seen.insert(normalize_name(&spec.name)))
        .collect()
}
