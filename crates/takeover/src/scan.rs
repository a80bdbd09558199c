use crate::model::{CheckOutcome, CheckResult, ResultWriter};
use crate::modules::nuclei::NucleiScan;
use crate::modules::takeover::TakeoverCheck;
use crate::modules::Module;
use crate::subdomains::load_subdomains;
use crate::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

// region:        --- Constants

// timeouts
pub const HTTP_REQUEST_TIMEOUT_MS: u64 = 10_000;

// endregion:     --- Constants

#[derive(Debug)]
pub struct ScanConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scanner: String,
}

// region:        --- Scan main function

/// One sequential pass: check every subdomain, then hand the whole list to
/// the external scanner. Returns the vulnerable subdomains in input order.
#[tokio::main(flavor = "current_thread")]
pub async fn scan(config: &ScanConfig) -> Result<Vec<String>> {
    let http_timeout = Duration::from_millis(HTTP_REQUEST_TIMEOUT_MS);
    let http_client = Client::builder().timeout(http_timeout).build()?;
    debug!("HTTP Client created: {:?}", http_client);

    run(&http_client, config).await
}

#[instrument(name = "scan", level = "debug", skip_all)]
async fn run(http_client: &Client, config: &ScanConfig) -> Result<Vec<String>> {
    let subdomains = load_subdomains(&config.input)?;
    let vulnerable = check_subdomains(http_client, &subdomains, &config.output).await?;

    // independent pass over the same list, its findings stay in its own output
    let module = NucleiScan::new(config.scanner.as_str());
    debug!("{}: {}", module.name(), module.description());
    module.run(&config.input).await?;

    info!("Vulnerable subdomains: {:?}", vulnerable);
    Ok(vulnerable)
}

// endregion:     --- Scan main function

// region:        --- Scan subfunctions

#[instrument(name = "subdomains", level = "debug", skip_all)]
async fn check_subdomains(
    http_client: &Client,
    subdomains: &[String],
    output: &Path,
) -> Result<Vec<String>> {
    let module = TakeoverCheck::new();
    debug!("{}: {}", module.name(), module.description());
    let mut writer = ResultWriter::create(output)?;
    let mut vulnerable = Vec::new();

    for subdomain in subdomains {
        let result = CheckResult {
            subdomain: subdomain.clone(),
            outcome: module.check(http_client, subdomain).await,
        };
        writer.write(&result)?;

        if let CheckOutcome::CheckFailed(reason) = &result.outcome {
            debug!("No result for {}: {}", result.subdomain, reason);
        }
        if result.outcome.is_vulnerable() {
            info!("Vulnerable subdomain found: {}", result.subdomain);
            vulnerable.push(result.subdomain);
        }
    }

    Ok(vulnerable)
}

// endregion:     --- Scan subfunctions

#[cfg(test)]
mod tests {
    use super::{run, ScanConfig};
    use crate::Error;
    use reqwest::Client;
    use std::fs;
    use std::net::TcpListener;
    use std::path::Path;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    }

    fn config(dir: &Path, subdomains: &[String], scanner: &str) -> ScanConfig {
        let input = dir.join("subdomains.txt");
        fs::write(&input, subdomains.join("\n")).unwrap();

        ScanConfig {
            input,
            output: dir.join("results.txt"),
            scanner: scanner.to_string(),
        }
    }

    #[tokio::test]
    async fn writes_results_in_order() {
        let a = serve(404, "Repository not found").await;
        let b = serve(200, "<html>welcome</html>").await;
        let a_host = a.address().to_string();
        let b_host = b.address().to_string();

        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path(), &[a_host.clone(), b_host.clone()], "true");

        let vulnerable = run(&client(), &config).await.unwrap();

        assert_eq!(vec![a_host.clone()], vulnerable);
        assert_eq!(
            format!(
                "{}, Vulnerable: True, Status Code: 404\n{}, Vulnerable: False, Status Code: 200\n",
                a_host, b_host
            ),
            fs::read_to_string(&config.output).unwrap()
        );
    }

    #[tokio::test]
    async fn failed_check_has_no_line() {
        let a = serve(200, "There isn't a GitHub Pages site here.").await;
        let a_host = a.address().to_string();
        let down = closed_port();

        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path(), &[down, a_host.clone()], "true");

        let vulnerable = run(&client(), &config).await.unwrap();

        assert_eq!(vec![a_host.clone()], vulnerable);
        assert_eq!(
            format!("{}, Vulnerable: True, Status Code: 200\n", a_host),
            fs::read_to_string(&config.output).unwrap()
        );
    }

    #[tokio::test]
    async fn scanner_failure_does_not_abort() {
        let b = serve(200, "ok").await;

        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path(), &[b.address().to_string()], "false");

        let vulnerable = run(&client(), &config).await.unwrap();

        assert!(vulnerable.is_empty());
    }

    #[tokio::test]
    async fn missing_scanner_is_fatal_after_checks() {
        let a = serve(404, "The specified bucket does not exist").await;
        let a_host = a.address().to_string();

        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path(), &[a_host.clone()], "nuclei-missing-8f3c2a");

        let res = run(&client(), &config).await;

        assert!(matches!(res, Err(Error::ScannerNotFound(_))));
        assert_eq!(
            format!("{}, Vulnerable: True, Status Code: 404\n", a_host),
            fs::read_to_string(&config.output).unwrap()
        );
    }

    #[tokio::test]
    async fn unreadable_input_stops_before_output() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ScanConfig {
            input: tmp.path().join("missing.txt"),
            output: tmp.path().join("results.txt"),
            scanner: "true".to_string(),
        };

        let res = run(&client(), &config).await;

        assert!(matches!(res, Err(Error::File(_))));
        assert!(!config.output.exists());
    }
}
