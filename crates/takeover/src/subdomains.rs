use crate::Result;
use std::fs;
use std::path::Path;
use tracing::{info, instrument, trace};

/// Reads one hostname per line, trimmed, skipping blank lines.
///
/// Order and duplicates are kept as given. An unreadable file is returned as
/// an error to the caller.
#[instrument(name = "load", level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_subdomains(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;

    let subdomains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .inspect(|subdomain| trace!("Collecting: {:?}", subdomain))
        .map(String::from)
        .collect();

    info!("loaded {} for scanning...", subdomains.len());
    Ok(subdomains)
}
