//! Linksys JNAP client.

use http::{HeaderName, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::device::{DeviceSource, FetchError, RawDevice};
use crate::transport::{HttpClient, HttpError, HttpRequest};

/// JNAP action paths used by this crate.
pub mod action {
    /// Lists every device the router knows about.
    pub const GET_DEVICES: &str = "/devicelist/GetDevices";
    /// Lists live network connections.
    pub const GET_NETWORK_CONNECTIONS: &str = "/networkconnections/GetNetworkConnections";
}

const ACTION_HEADER: HeaderName = HeaderName::from_static("x-jnap-action");
const ACTION_PREFIX: &str = "http://linksys.com/jnap";
const RESULT_OK: &str = "OK";

/// JNAP response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    result: String,
    #[serde(default)]
    output: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DevicesOutput {
    #[serde(default)]
    devices: Vec<RawDevice>,
}

#[derive(Debug, Deserialize)]
struct ConnectionsOutput {
    #[serde(default)]
    connections: Vec<Connection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection {
    mac_address: String,
}

/// Client for the router's unauthenticated JNAP endpoint.
///
/// Every call is a POST of an empty JSON object to `http://<router>/JNAP/`
/// with the action named in the `X-JNAP-Action` header.
#[derive(Debug, Clone)]
pub struct JnapClient<H> {
    client: H,
    endpoint: Url,
}

impl<H: HttpClient> JnapClient<H> {
    /// Creates a client for the router at `address` (host or host:port).
    ///
    /// # Errors
    ///
    /// Returns an error if `address` does not form a valid URL.
    pub fn new(client: H, address: &str) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(&format!("http://{address}/JNAP/"))?;
        Ok(Self { client, endpoint })
    }

    /// Returns the JNAP endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Performs one JNAP action and returns its `output` object.
    async fn call(&self, action: &str) -> Result<serde_json::Value, FetchError> {
        let header = HeaderValue::from_str(&format!("{ACTION_PREFIX}{action}"))
            .map_err(|e| HttpError::InvalidRequest(e.to_string()))?;
        let request = HttpRequest::post(self.endpoint.clone())
            .with_header(ACTION_HEADER, header)
            .with_json(&serde_json::json!({}));

        let response = self.client.request(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        let envelope: Envelope =
            serde_json::from_slice(&response.body).map_err(FetchError::Decode)?;
        if envelope.result != RESULT_OK {
            return Err(FetchError::Rejected {
                result: envelope.result,
            });
        }

        Ok(envelope.output)
    }
}

impl<H: HttpClient> DeviceSource for JnapClient<H> {
    async fn registered_devices(&self) -> Result<Vec<RawDevice>, FetchError> {
        let output = self.call(action::GET_DEVICES).await?;
        let parsed: DevicesOutput = serde_json::from_value(output).map_err(FetchError::Decode)?;
        Ok(parsed.devices)
    }

    async fn connected_macs(&self) -> Result<Vec<String>, FetchError> {
        let output = self.call(action::GET_NETWORK_CONNECTIONS).await?;
        let parsed: ConnectionsOutput =
            serde_json::from_value(output).map_err(FetchError::Decode)?;
        Ok(parsed
            .connections
            .into_iter()
            .map(|c| c.mac_address)
            .collect())
    }
}

#[cfg(test)]
#[path = "jnap_tests.rs"]
mod tests;
