use crate::model::CheckOutcome;
use crate::modules::{http_request, Module};
use crate::{Error, Result};
use reqwest::Client;
use tracing::{error, info, instrument};

/// Body fragments that point to a dangling resource. Plain substring match:
/// "404" anywhere in a page is enough, and differently worded error pages
/// are missed.
pub const INDICATORS: [&str; 5] = [
    "404",
    "The specified bucket does not exist",
    "Repository not found",
    "This site can’t be reached",
    "There isn't a GitHub Pages site here.",
];

// region:        --- Module info

pub struct TakeoverCheck {}

impl TakeoverCheck {
    pub fn new() -> Self {
        Self {}
    }

    pub fn is_dangling(&self, body: &str) -> bool {
        INDICATORS.iter().any(|indicator| body.contains(indicator))
    }
}

impl Module for TakeoverCheck {
    fn name(&self) -> String {
        "http/takeover_indicators".to_string()
    }
    fn description(&self) -> String {
        "Check a subdomain homepage for signs of an unclaimed resource".to_string()
    }
}

// endregion:     --- Module info

impl TakeoverCheck {
    /// GET `http://<subdomain>` and classify the body.
    ///
    /// Request failures are logged and reported as `CheckFailed`, they never
    /// stop the caller.
    #[instrument(name = "check", level = "debug", fields(module = self.name()), skip_all)]
    pub async fn check(&self, http_client: &Client, subdomain: &str) -> CheckOutcome {
        let url = format!("http://{}", subdomain);

        match self.fetch(http_client, &url).await {
            Ok((status, body)) if self.is_dangling(&body) => {
                info!("{} appears vulnerable. Status Code: {}", subdomain, status);
                CheckOutcome::Vulnerable { status }
            }
            Ok((status, _)) => CheckOutcome::NotVulnerable { status },
            Err(err) => {
                let reason = match err {
                    Error::Reqwest(err) => err.to_string(),
                    other => other.to_string(),
                };
                error!("Failed to check {}: {}", subdomain, reason);
                CheckOutcome::CheckFailed(reason)
            }
        }
    }

    async fn fetch(&self, http_client: &Client, url: &str) -> Result<(u16, String)> {
        let res = http_request(http_client, url).await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok((status, body))
    }
}
