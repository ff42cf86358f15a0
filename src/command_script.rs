use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandScriptFile {
    steps: Vec<String>,
}

/// Ordered list of console commands loaded from JSON.
///
/// The file format is `{ "steps": ["add stone 70", "remove stone 64"] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScript {
    steps: Vec<String>,
}

impl CommandScript {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::from_str(&contents)
            .with_context(|| format!("invalid command script {}", path.display()))
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut steps = Vec::with_capacity(file.steps.len());
        for (index, step) in file.steps.into_iter().enumerate() {
            let command = step.trim();
            if command.is_empty() {
                anyhow::bail!("command script step {index} is empty");
            }
            steps.push(command.to_string());
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}
