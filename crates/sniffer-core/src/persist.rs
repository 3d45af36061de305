//! Response persistence
//!
//! The assistant's reply is parsed as JSON on a best-effort basis. A parsed
//! reply goes to [`STRUCTURED_OUTPUT_FILE`] pretty-printed; anything else goes
//! verbatim to [`RAW_OUTPUT_FILE`]. Exactly one of the two is written, and it
//! is overwritten in full.

use crate::error::PersistError;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

type Result<T> = std::result::Result<T, PersistError>;

/// File written when the reply parses as JSON
pub const STRUCTURED_OUTPUT_FILE: &str = "sniffer_output.json";

/// File written when it does not
pub const RAW_OUTPUT_FILE: &str = "sniffer_output_raw.txt";

/// A reply that is one Markdown code block, optionally tagged (```json)
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```$")
        .expect("code fence pattern is valid")
});

/// Outcome of parsing an assistant reply
#[derive(Debug, Clone, PartialEq)]
pub enum SnifferOutput {
    /// Reply was valid JSON
    Parsed(Value),
    /// Reply was not JSON; kept exactly as received
    Unparsed(String),
}

impl SnifferOutput {
    /// Classify a reply
    ///
    /// A reply wrapped in a single code fence is parsed from the fence body.
    pub fn from_response(response: &str) -> Self {
        let candidate = strip_code_fence(response).unwrap_or(response);

        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => SnifferOutput::Parsed(value),
            Err(e) => {
                warn!("Assistant reply is not valid JSON ({e}); keeping raw text");
                SnifferOutput::Unparsed(response.to_string())
            }
        }
    }

    /// Whether the reply parsed
    pub fn is_parsed(&self) -> bool {
        matches!(self, SnifferOutput::Parsed(_))
    }
}

fn strip_code_fence(text: &str) -> Option<&str> {
    CODE_FENCE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

/// Writes [`SnifferOutput`] into a directory
#[derive(Debug, Clone)]
pub struct Persister {
    output_dir: PathBuf,
}

impl Persister {
    /// Persist into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the structured output file
    pub fn structured_path(&self) -> PathBuf {
        self.output_dir.join(STRUCTURED_OUTPUT_FILE)
    }

    /// Path of the raw-text output file
    pub fn raw_path(&self) -> PathBuf {
        self.output_dir.join(RAW_OUTPUT_FILE)
    }

    /// Write `output` to its file, returning the path written
    pub async fn persist(&self, output: &SnifferOutput) -> Result<PathBuf> {
        match output {
            SnifferOutput::Parsed(value) => {
                let path = self.structured_path();
                let encoded = serde_json::to_string_pretty(value)?;
                write_file(&path, encoded.as_bytes()).await?;
                info!(path = %path.display(), "Structured output saved");
                Ok(path)
            }
            SnifferOutput::Unparsed(raw) => {
                let path = self.raw_path();
                write_file(&path, raw.as_bytes()).await?;
                warn!(path = %path.display(), "Raw response saved; manual review required");
                Ok(path)
            }
        }
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })
}
