//! Child-process execution seam

use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::{Output, Stdio};

use tokio::process::Command;

/// A single program execution: program path, argv and the PATH it runs with.
///
/// Arguments are passed to the OS one element each; nothing is ever joined
/// into a shell command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub search_path: OsString,
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Message describing a failed run: trimmed stderr, or the exit status
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("process exited with status {}", code),
            None => "process terminated by signal".to_string(),
        }
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs invocations to completion.
///
/// The exporter talks to the OS only through this trait so tests can stand
/// in for the credential-manager tool.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = io::Result<ProcessOutput>> + Send;
}

/// Production runner backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .env("PATH", &invocation.search_path)
            .stdin(Stdio::null())
            .output()
            .await?;
        Ok(output.into())
    }
}
