use crate::modules::Module;
use crate::{Error, Result};
use std::io;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

pub const NUCLEI_BIN: &str = "nuclei";

// silent, stats, 10s per target, 100 req/s, high + medium templates only
const NUCLEI_ARGS: [&str; 8] = [
    "-silent",
    "-stats",
    "-timeout",
    "10",
    "-rate-limit",
    "100",
    "-severity",
    "high,medium",
];

#[derive(Debug, PartialEq, Eq)]
pub enum ScannerOutcome {
    Completed,
    /// Exit code, `None` when killed by a signal.
    Failed(Option<i32>),
}

// region:        --- Module info

pub struct NucleiScan {
    program: String,
}

impl NucleiScan {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-l").arg(input).args(NUCLEI_ARGS);
        cmd
    }
}

impl Module for NucleiScan {
    fn name(&self) -> String {
        "external/nuclei".to_string()
    }
    fn description(&self) -> String {
        "Run nuclei templates (high, medium) over the subdomain list".to_string()
    }
}

// endregion:     --- Module info

impl NucleiScan {
    /// Runs the scanner to completion over `input`.
    ///
    /// A missing executable is an error; a scanner that ran and exited
    /// non-zero is only logged.
    #[instrument(name = "external_scan", level = "debug", fields(module = self.name()), skip_all)]
    pub async fn run(&self, input: &Path) -> Result<ScannerOutcome> {
        let output = match self.command(input).output().await {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                error!("Nuclei executable not found: {}", self.program);
                return Err(Error::ScannerNotFound(self.program.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        if output.status.success() {
            info!("Nuclei scan completed successfully");
            debug!("{}", String::from_utf8_lossy(&output.stdout));
            Ok(ScannerOutcome::Completed)
        } else {
            error!("Nuclei scan failed ({})", output.status);
            error!("{}", String::from_utf8_lossy(&output.stderr));
            Ok(ScannerOutcome::Failed(output.status.code()))
        }
    }
}
