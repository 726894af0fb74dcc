use std::path::PathBuf;

use anyhow::{bail, Context};

/// Checker configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// JSON file holding the field rule.
    pub rule_file: PathBuf,
    /// JSON-lines input; `None` reads stdin.
    pub input_file: Option<PathBuf>,
    /// Stop at the first invalid or malformed record.
    pub fail_fast: bool,
}

impl CheckConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var      | Default  |
    /// |--------------|----------|
    /// | `RULE_FILE`  | required |
    /// | `INPUT_FILE` | stdin    |
    /// | `FAIL_FAST`  | `false`  |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rule_file = lookup("RULE_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .context("RULE_FILE environment variable is required")?;

        let input_file = lookup("INPUT_FILE")
            .filter(|v| !v.trim().is_empty() && v.trim() != "-")
            .map(PathBuf::from);

        let fail_fast = match lookup("FAIL_FAST") {
            Some(raw) => parse_bool(&raw).context("FAIL_FAST must be a boolean")?,
            None => false,
        };

        Ok(Self {
            rule_file,
            input_file,
            fail_fast,
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized boolean value `{other}`"),
    }
}
