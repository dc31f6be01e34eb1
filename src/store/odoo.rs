//! Odoo client over the `/jsonrpc` endpoint.
//!
//! Bootstraps a uid with `common.login`, then goes through
//! `object.execute_kw` for everything else. The one model this crate
//! touches is the call log.

use anyhow::{Context, Result};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::CallRecord;

use super::CallLogStore;

const CALL_LOG_MODEL: &str = "logs.3cx";

/// Call-log store backed by an Odoo instance.
#[derive(Debug)]
pub struct OdooStore {
    client: Client,
    endpoint: String,
    db: String,
    password: SecretString,
    uid: i64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl OdooStore {
    /// Authenticate against Odoo and return a ready store.
    pub async fn login(
        url: &str,
        db: impl Into<String>,
        username: &str,
        password: SecretString,
    ) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        let endpoint = format!("{}/jsonrpc", url.trim_end_matches('/'));
        let db = db.into();

        let result = call(
            &client,
            &endpoint,
            "common",
            "login",
            json!([db, username, password.expose_secret()]),
        )
        .await?;

        // Odoo answers a bad login with `false` rather than an error.
        let uid = result
            .as_i64()
            .filter(|uid| *uid > 0)
            .context("Odoo login rejected: check database name and credentials")?;

        tracing::info!(uid, endpoint = %endpoint, "Authenticated against Odoo");

        Ok(Self {
            client,
            endpoint,
            db,
            password,
            uid,
        })
    }

    async fn execute_kw(&self, method: &str, args: Value) -> Result<Value> {
        call(
            &self.client,
            &self.endpoint,
            "object",
            "execute_kw",
            json!([
                self.db,
                self.uid,
                self.password.expose_secret(),
                CALL_LOG_MODEL,
                method,
                args
            ]),
        )
        .await
    }
}

#[async_trait::async_trait]
impl CallLogStore for OdooStore {
    async fn exists(&self, call_id: &str) -> Result<bool> {
        let ids = self
            .execute_kw("search", json!([[["call_id", "=", call_id]]]))
            .await
            .with_context(|| format!("Odoo search failed for call_id {call_id}"))?;

        Ok(ids.as_array().is_some_and(|ids| !ids.is_empty()))
    }

    async fn create(&self, record: &CallRecord) -> Result<()> {
        let fields = serde_json::to_value(record).context("Failed to serialize call record")?;
        let id = self
            .execute_kw("create", json!([fields]))
            .await
            .with_context(|| format!("Odoo create failed for call_id {}", record.call_id))?;

        tracing::debug!(call_id = %record.call_id, odoo_id = ?id, "Created Odoo call log");
        Ok(())
    }
}

async fn call(
    client: &Client,
    endpoint: &str,
    service: &str,
    method: &str,
    args: Value,
) -> Result<Value> {
    let request = json!({
        "jsonrpc": "2.0",
        "method": "call",
        "params": { "service": service, "method": method, "args": args },
        "id": 1,
    });

    let response = client
        .post(endpoint)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("Odoo JSON-RPC request failed ({service}.{method})"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Odoo JSON-RPC request failed ({service}.{method}): HTTP {status}");
    }

    let body: JsonRpcResponse = response
        .json()
        .await
        .context("Failed to parse Odoo JSON-RPC response")?;

    if let Some(error) = body.error {
        anyhow::bail!(
            "Odoo JSON-RPC error ({service}.{method}): {} (code {})",
            error.message,
            error.code
        );
    }

    Ok(body.result.unwrap_or(Value::Null))
}
