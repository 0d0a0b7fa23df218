//! Launch derivation for server descriptors

use std::collections::HashMap;
use std::path::Path;

use mcphub_core::{HubError, ServerDescriptor};

/// Script extension → interpreter.
const INTERPRETERS: &[(&str, &str)] = &[("py", "python"), ("js", "node")];

/// Concrete command line derived from a descriptor, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
}

impl LaunchPlan {
    /// Derive the command either from the descriptor's explicit command/args
    /// pair or, for a bare script path, from the file extension. Unknown
    /// extensions are rejected here, before any process is spawned.
    pub fn derive(descriptor: &ServerDescriptor) -> Result<Self, HubError> {
        if let Some(command) = &descriptor.command {
            return Ok(Self {
                command: command.clone(),
                args: descriptor.args.clone(),
                env: descriptor.env.clone(),
            });
        }

        let extension = Path::new(&descriptor.identifier)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let interpreter = INTERPRETERS
            .iter()
            .find(|(known, _)| extension.eq_ignore_ascii_case(known))
            .map(|(_, interpreter)| *interpreter)
            .ok_or_else(|| HubError::UnsupportedScriptType {
                path: descriptor.identifier.clone(),
            })?;

        Ok(Self {
            command: interpreter.to_string(),
            args: vec![descriptor.identifier.clone()],
            env: descriptor.env.clone(),
        })
    }
}
