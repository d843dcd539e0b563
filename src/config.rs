// Runtime configuration: credentials read from the local secrets file plus
// the few knobs the CLI exposes. Built once in `main` and handed to the
// API client, nothing here is global.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SECRETS_PATH: &str = "secrets.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "data/export_answers.json";
pub const DEFAULT_REGION: &str = "francecentral";

/// Credentials and settings needed to talk to the Translator endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub subscription_key: String,
    pub endpoint: String,
    pub region: String,
    pub output_path: PathBuf,
}

impl Config {
    /// Read the subscription key (first line) and the endpoint (second line)
    /// from `path`. The region comes from `AZURE_TRANSLATOR_REGION` or falls
    /// back to `francecentral`.
    pub fn from_secrets_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read secrets file {}", path.display()))?;
        let (subscription_key, endpoint) = parse_secrets(&content)
            .with_context(|| format!("Invalid secrets file {}", path.display()))?;

        let region = std::env::var("AZURE_TRANSLATOR_REGION")
            .unwrap_or_else(|_| DEFAULT_REGION.into());

        Ok(Config {
            subscription_key,
            endpoint,
            region,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        })
    }

    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }

    /// Full URL of the detect route, without query parameters.
    pub fn detect_url(&self) -> String {
        format!("{}/detect", self.endpoint.trim_end_matches('/'))
    }
}

fn parse_secrets(content: &str) -> Result<(String, String)> {
    let mut lines = content.lines().map(str::trim);
    let key = lines.next().filter(|l| !l.is_empty());
    let endpoint = lines.next().filter(|l| !l.is_empty());
    match (key, endpoint) {
        (Some(k), Some(e)) => Ok((k.to_string(), e.to_string())),
        _ => anyhow::bail!("expected two lines: subscription key, then endpoint"),
    }
}
