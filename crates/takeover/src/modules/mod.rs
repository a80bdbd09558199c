pub mod nuclei;
pub mod takeover;

use crate::{Error, Result};
use reqwest::{Client, Response};
use tracing::{debug, instrument};

pub trait Module {
    fn name(&self) -> String;
    fn description(&self) -> String;
}

// region:        --- HTTP requests

#[instrument(name = "HTTP_request", level = "debug", skip_all, fields(url = url))]
pub async fn http_request(http_client: &Client, url: &str) -> Result<Response> {
    debug!("Sending request");
    match http_client.get(url).send().await {
        Ok(res) => {
            debug!("Receive with status: {}", res.status());
            Ok(res)
        }
        Err(err) => {
            debug!("Reason: {}", err);
            Err(Error::Reqwest(err))
        }
    }
}

// endregion:     --- HTTP requests
