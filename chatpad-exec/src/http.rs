//! HTTP implementation of [`RemoteExecutor`].
//!
//! Uses a `ureq` agent configured with native-tls, which works better in VM
//! environments where ring/rustls may have issues.

use crate::error::ExecError;
use crate::remote::{ExecRequest, ExecResponse, RemoteExecutor};
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Maximum response body size accepted from the execution service (10 MB).
pub const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Create a new HTTP agent configured with native-tls and a global timeout.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Posts requests as JSON to a fixed endpoint.
pub struct HttpExecutor {
    agent: Agent,
    endpoint: String,
}

impl HttpExecutor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            endpoint: endpoint.into(),
        }
    }
}

impl RemoteExecutor for HttpExecutor {
    fn execute(&self, request: &ExecRequest) -> Result<ExecResponse, ExecError> {
        let body = serde_json::to_string(request)?;

        let text = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", "chatpad")
            .send(body)?
            .into_body()
            .with_config()
            .limit(MAX_RESPONSE_SIZE)
            .read_to_string()?;

        Ok(serde_json::from_str(&text)?)
    }
}
