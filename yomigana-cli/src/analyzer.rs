//! External analyzer process
//!
//! The analyzer is any shell command: it receives one chunk on stdin and
//! prints its tokens on stdout. A fresh process is started per chunk.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use yomigana_engine::analyzer::{jlp, tsv};
use yomigana_engine::{Analyzer, AnalyzerError, Token};

/// Wire protocol spoken by the analyzer command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Raw text in, `surface<TAB>reading` lines (or MeCab output) out
    #[default]
    Tsv,
    /// JLP JSON-RPC request in, JSON-RPC response out
    Jlp,
}

/// Analyzer backed by a shell command
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    command: String,
    protocol: Protocol,
    calls: usize,
}

impl CommandAnalyzer {
    /// Create an analyzer that runs `command` through `sh -c`
    pub fn new(command: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            command: command.into(),
            protocol,
            calls: 0,
        }
    }

    /// The configured command line
    pub fn command(&self) -> &str {
        &self.command
    }

    fn request_body(&self, text: &str) -> Result<String, AnalyzerError> {
        match self.protocol {
            Protocol::Tsv => Ok(text.to_string()),
            Protocol::Jlp => jlp::Request::new(self.calls.to_string(), text).to_json(),
        }
    }

    fn run(&self, input: String) -> Result<String, AnalyzerError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AnalyzerError::Aborted(format!("cannot start `{}`: {e}", self.command)))?;

        // Feed stdin from a separate thread so a chatty child cannot block on a full stdout pipe
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| AnalyzerError::Unavailable(format!("`{}`: {e}", self.command)))?;

        if let Some(writer) = writer {
            // Commands that ignore stdin close the pipe early
            if let Ok(Err(e)) = writer.join() {
                log::debug!("analyzer did not consume its input: {e}");
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(AnalyzerError::Unavailable(if stderr.is_empty() {
                format!("`{}` exited with {}", self.command, output.status)
            } else {
                format!("`{}` exited with {}: {stderr}", self.command, output.status)
            }));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| AnalyzerError::Malformed(format!("output is not UTF-8: {e}")))
    }
}

impl Analyzer for CommandAnalyzer {
    fn analyze(&mut self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        let body = self.request_body(text)?;
        self.calls += 1;
        log::trace!("analyzer call {} ({} chars)", self.calls, text.chars().count());

        let stdout = self.run(body)?;
        match self.protocol {
            Protocol::Tsv => tsv::parse_tsv(&stdout),
            Protocol::Jlp => jlp::parse_response(&stdout),
        }
    }
}
