//! Credential export to the 1Password CLI
//!
//! [`Exporter::export`] locates the `op` executable, runs its
//! `item create` subcommand with an argument vector built from a
//! [`CredentialRecord`], and folds every outcome into an [`ExportResult`].

mod command;
pub mod locate;
mod record;
pub mod runner;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
pub use command::create_login_args;
pub use locate::{augmented_search_path, locate_tool, TOOL_NOT_FOUND_MESSAGE};
pub use record::{CredentialRecord, ExportResult, ItemSummary, VaultRef};
pub use runner::{Invocation, ProcessOutput, ProcessRunner, TokioProcessRunner};

/// Default credential-manager executable name
pub const DEFAULT_TOOL_NAME: &str = "op";

/// Exporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Executable name to look up
    pub tool_name: String,
    /// Absolute executable path, skips the lookup when set
    pub tool_path: Option<PathBuf>,
    /// Directories appended to the inherited search path
    pub extra_search_dirs: Vec<PathBuf>,
    /// Target vault; the tool's default vault when unset
    pub vault: Option<String>,
    /// Ask the tool for JSON output (see [`ItemSummary::parse`])
    pub json_output: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            tool_path: None,
            extra_search_dirs: Vec::new(),
            vault: None,
            json_output: false,
        }
    }
}

/// Releases the in-flight flag when dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ExportInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Saves credential records through the external tool.
///
/// At most one export runs at a time per exporter; an overlapping call
/// fails with [`Error::ExportInProgress`] without starting any process.
pub struct Exporter<R = TokioProcessRunner> {
    config: ExporterConfig,
    runner: R,
    in_flight: AtomicBool,
}

impl Exporter {
    /// Exporter running real child processes
    pub fn new(config: ExporterConfig) -> Self {
        Self::with_runner(config, TokioProcessRunner)
    }
}

impl<R: ProcessRunner> Exporter<R> {
    pub fn with_runner(config: ExporterConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Whether an export is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Inherited `PATH` extended with the configured and default directories
    pub fn search_path(&self) -> Result<OsString> {
        augmented_search_path(
            std::env::var_os("PATH").as_deref(),
            &self.config.extra_search_dirs,
        )
    }

    /// Create a login item for `record`. Never fails; errors become
    /// [`ExportResult::Failure`].
    pub async fn export(&self, record: &CredentialRecord) -> ExportResult {
        let result = self.try_export(record).await;
        match &result {
            Ok(_) => info!(title = %record.title, "saved login item"),
            Err(e) => warn!(title = %record.title, error = %e, "export failed"),
        }
        result.into()
    }

    /// Create a login item for `record`, returning the tool's stdout
    pub async fn try_export(&self, record: &CredentialRecord) -> Result<String> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        record.validate()?;

        let search_path = self.search_path()?;
        let program = match &self.config.tool_path {
            Some(path) => path.clone(),
            None => locate_tool(&self.runner, &self.config.tool_name, &search_path).await?,
        };

        let invocation = Invocation {
            program,
            args: create_login_args(record, &self.config),
            search_path,
        };
        debug!(
            program = %invocation.program.display(),
            arg_count = invocation.args.len(),
            "creating login item"
        );

        let output = self.runner.run(&invocation).await.map_err(|e| {
            Error::ExternalProcess(format!(
                "failed to start {}: {}",
                invocation.program.display(),
                e
            ))
        })?;

        if output.success {
            Ok(output.stdout)
        } else {
            Err(Error::ExternalProcess(output.failure_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;

    type Response = std::result::Result<ProcessOutput, io::ErrorKind>;

    /// Answers the lookup and the create call with canned responses
    struct StubRunner {
        lookup: Response,
        create: Response,
        gate: Option<Notify>,
        calls: Mutex<Vec<Invocation>>,
    }

    impl StubRunner {
        fn found() -> Self {
            Self {
                lookup: Ok(ok_output("/usr/local/bin/op\n")),
                create: Ok(ok_output("ID: 2fcbqwe9ndg175zg2dzwftvkpa\n")),
                gate: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn not_found() -> Self {
            Self { lookup: Ok(ok_output("")), ..Self::found() }
        }

        fn gated() -> Self {
            Self { gate: Some(Notify::new()), ..Self::found() }
        }

        fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for StubRunner {
        async fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
            self.calls.lock().unwrap().push(invocation.clone());
            if invocation.program == Path::new(locate::lookup_program()) {
                return self.lookup.clone().map_err(io::Error::from);
            }
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.create.clone().map_err(io::Error::from)
        }
    }

    fn ok_output(stdout: &str) -> ProcessOutput {
        ProcessOutput { success: true, code: Some(0), stdout: stdout.to_string(), stderr: String::new() }
    }

    fn gmail(website: &str) -> CredentialRecord {
        CredentialRecord::new("Gmail", "Ab1!ab1!")
            .with_username("me@x.com")
            .with_website(website)
    }

    #[tokio::test]
    async fn test_export_without_website() {
        let exporter = Exporter::with_runner(ExporterConfig::default(), StubRunner::found());
        let result = exporter.export(&gmail("")).await;
        assert_eq!(
            result,
            ExportResult::Success { raw_output: "ID: 2fcbqwe9ndg175zg2dzwftvkpa\n".to_string() }
        );

        let calls = exporter.runner().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].program, PathBuf::from("/usr/local/bin/op"));
        assert!(!calls[1].args.iter().any(|a| a.starts_with("--url")));
    }

    #[tokio::test]
    async fn test_export_with_website() {
        let exporter = Exporter::with_runner(ExporterConfig::default(), StubRunner::found());
        assert!(exporter.export(&gmail("https://gmail.com")).await.is_success());

        let calls = exporter.runner().calls();
        assert!(calls[1].args.contains(&"--url=https://gmail.com".to_string()));
    }

    #[tokio::test]
    async fn test_export_tool_not_found_stops_early() {
        let exporter = Exporter::with_runner(ExporterConfig::default(), StubRunner::not_found());
        let result = exporter.export(&gmail("")).await;

        let message = result.message().unwrap();
        assert!(message.contains("Please ensure it is installed"));
        // Only the lookup ran
        let calls = exporter.runner().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from(locate::lookup_program()));
    }

    #[tokio::test]
    async fn test_export_tool_failure_reports_stderr() {
        let runner = StubRunner {
            create: Ok(ProcessOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: "[ERROR] 2024/01/01 you are not currently signed in\n".to_string(),
            }),
            ..StubRunner::found()
        };
        let exporter = Exporter::with_runner(ExporterConfig::default(), runner);
        let result = exporter.export(&gmail("")).await;
        assert_eq!(
            result.message(),
            Some("[ERROR] 2024/01/01 you are not currently signed in")
        );
    }

    #[tokio::test]
    async fn test_export_spawn_failure() {
        let runner = StubRunner { create: Err(io::ErrorKind::PermissionDenied), ..StubRunner::found() };
        let exporter = Exporter::with_runner(ExporterConfig::default(), runner);
        let message = exporter.export(&gmail("")).await.message().unwrap().to_string();
        assert!(message.starts_with("failed to start /usr/local/bin/op"));
        assert!(!exporter.is_busy());
    }

    #[tokio::test]
    async fn test_export_with_tool_path_skips_lookup() {
        let config = ExporterConfig {
            tool_path: Some(PathBuf::from("/opt/1password/op")),
            ..Default::default()
        };
        let exporter = Exporter::with_runner(config, StubRunner::not_found());
        assert!(exporter.export(&gmail("")).await.is_success());

        let calls = exporter.runner().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from("/opt/1password/op"));
    }

    #[tokio::test]
    async fn test_export_blank_title_rejected() {
        let exporter = Exporter::with_runner(ExporterConfig::default(), StubRunner::found());
        let result = exporter.export(&CredentialRecord::new(" ", "pw")).await;
        assert!(result.message().unwrap().contains("title must not be empty"));
        assert!(exporter.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_export_quotes_do_not_escape_arguments() {
        let exporter = Exporter::with_runner(ExporterConfig::default(), StubRunner::found());
        let record = CredentialRecord::new(r#"Bob's "work" login"#, r#"p"w --vault="x""#);
        assert!(exporter.export(&record).await.is_success());

        let args = &exporter.runner().calls()[1].args;
        assert!(args.contains(&r#"--title=Bob's "work" login"#.to_string()));
        assert!(args.contains(&r#"password=p"w --vault="x""#.to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--vault")));
    }

    #[tokio::test]
    async fn test_overlapping_export_rejected() {
        let exporter = Exporter::with_runner(ExporterConfig::default(), StubRunner::gated());
        let record = gmail("");

        let mut first = Box::pin(exporter.export(&record));
        assert!(tokio::time::timeout(Duration::from_millis(50), &mut first).await.is_err());
        assert!(exporter.is_busy());

        let second = exporter.export(&record).await;
        assert_eq!(second.message(), Some("An export is already in progress"));

        exporter.runner().gate.as_ref().unwrap().notify_one();
        assert!(first.await.is_success());
        assert!(!exporter.is_busy());

        // lookup + create from the first call only
        assert_eq!(exporter.runner().calls().len(), 2);

        // Guard released; a later call goes through
        exporter.runner().gate.as_ref().unwrap().notify_one();
        assert!(exporter.export(&record).await.is_success());
    }
}
