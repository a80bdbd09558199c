use crate::utils::ensure_dir;
use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// region:        --- Models

/// Result of probing one subdomain.
///
/// `CheckFailed` means nothing could be determined (timeout, DNS failure,
/// refused connection...) and must never be read as "not vulnerable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Vulnerable { status: u16 },
    NotVulnerable { status: u16 },
    CheckFailed(String),
}

impl CheckOutcome {
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, CheckOutcome::Vulnerable { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CheckOutcome::Vulnerable { status } | CheckOutcome::NotVulnerable { status } => {
                Some(*status)
            }
            CheckOutcome::CheckFailed(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub subdomain: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// Output line for this result, without the trailing newline.
    /// Failed checks have no record.
    pub fn record(&self) -> Option<String> {
        let status = self.outcome.status()?;
        let vulnerable = if self.outcome.is_vulnerable() {
            "True"
        } else {
            "False"
        };

        Some(format!(
            "{}, Vulnerable: {}, Status Code: {}",
            self.subdomain, vulnerable, status
        ))
    }
}

// endregion:     --- Models

// region:        --- Exporting utils

/// Output file, truncated on creation and kept open for the whole run.
/// Each record is written as soon as it is known.
pub struct ResultWriter {
    file: File,
}

impl ResultWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Returns `false` when the result had no record to write.
    pub fn write(&mut self, result: &CheckResult) -> Result<bool> {
        match result.record() {
            Some(record) => {
                writeln!(self.file, "{}", record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// endregion:     --- Exporting utils
