//! `mcp_config.json` parsing
//!
//! Standard MCP client format: an `mcpServers` map of launch entries, the
//! same shape VS Code, Cursor, and Claude Desktop write. Entry order in the
//! file is the bulk-registration order, so parsing goes through
//! `serde_json::Map` (insertion-ordered via `preserve_order`).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::domain::ServerDescriptor;

/// One server entry as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    /// Executable to launch. May be omitted for script-path entries.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "mcpServers")]
    mcp_servers: serde_json::Map<String, serde_json::Value>,
}

/// Parsed configuration, entries in file order.
#[derive(Debug, Clone, Default)]
pub struct HubConfig {
    entries: Vec<(String, ServerEntry)>,
}

impl HubConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let raw: RawConfig = serde_json::from_str(raw).context("invalid mcp_config.json")?;
        let mut entries = Vec::with_capacity(raw.mcp_servers.len());
        for (name, value) in raw.mcp_servers {
            let entry: ServerEntry = serde_json::from_value(value)
                .with_context(|| format!("invalid config entry for server {name}"))?;
            entries.push((name, entry));
        }
        Ok(Self { entries })
    }

    /// Descriptors for every configured server, in file order.
    pub fn descriptors(&self) -> Vec<ServerDescriptor> {
        self.entries
            .iter()
            .map(|(name, entry)| descriptor_for(name, entry))
            .collect()
    }

    /// Descriptor for one configured server by name.
    pub fn get(&self, name: &str) -> Option<ServerDescriptor> {
        self.entries
            .iter()
            .find(|(id, _)| id == name)
            .map(|(id, entry)| descriptor_for(id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn descriptor_for(name: &str, entry: &ServerEntry) -> ServerDescriptor {
    ServerDescriptor {
        identifier: name.to_string(),
        command: entry.command.clone(),
        args: entry.args.clone(),
        env: entry.env.clone(),
    }
}
