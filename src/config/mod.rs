//! Relay configuration (explicit struct, optionally loaded from env).

use std::time::Duration;

use bon::Builder;

use crate::error::RelayError;

/// Default connect timeout for the managed client.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default read timeout for the managed client. Agent turns can be slow.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(120);

/// Node and output names the flow entry point is wired to.
pub const DEFAULT_FLOW_INPUT_NODE: &str = "FlowInputNode";
pub const DEFAULT_FLOW_INPUT_OUTPUT: &str = "document";

/// Configuration for one relay deployment.
///
/// Built once at startup and handed to the runtime and service. Agent and
/// flow identifiers are optional here; a handler only needs the pair it
/// actually invokes, which is checked with [`RelayConfig::require_agent`] /
/// [`RelayConfig::require_flow`] at call time.
#[derive(Debug, Clone, Builder)]
pub struct RelayConfig {
    #[builder(into)]
    pub agent_id: Option<String>,
    #[builder(into)]
    pub agent_alias_id: Option<String>,
    #[builder(into)]
    pub flow_id: Option<String>,
    #[builder(into)]
    pub flow_alias_id: Option<String>,
    #[builder(into)]
    pub region: Option<String>,
    /// Endpoint override (local stacks, VPC endpoints).
    #[builder(into)]
    pub endpoint_url: Option<String>,
    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,
    #[builder(default = DEFAULT_READ_TIMEOUT)]
    pub read_timeout: Duration,
    #[builder(default = true)]
    pub enable_trace: bool,
    #[builder(default = false)]
    pub end_session: bool,
    #[builder(into, default = DEFAULT_FLOW_INPUT_NODE.to_string())]
    pub flow_input_node: String,
    #[builder(into, default = DEFAULT_FLOW_INPUT_OUTPUT.to_string())]
    pub flow_input_output: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RelayConfig {
    /// Load from environment variables (AGENT_ID, FLOW_ID, etc.).
    pub fn from_env() -> Result<Self, RelayError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let connect_timeout = match get("RELAY_CONNECT_TIMEOUT_SECS") {
            Some(raw) => parse_secs("RELAY_CONNECT_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_CONNECT_TIMEOUT,
        };
        let read_timeout = match get("RELAY_READ_TIMEOUT_SECS") {
            Some(raw) => parse_secs("RELAY_READ_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_READ_TIMEOUT,
        };

        Ok(Self::builder()
            .maybe_agent_id(get("AGENT_ID"))
            .maybe_agent_alias_id(get("AGENT_ALIAS_ID"))
            .maybe_flow_id(get("FLOW_ID"))
            .maybe_flow_alias_id(get("FLOW_ALIAS_ID"))
            .maybe_region(get("AWS_REGION"))
            .maybe_endpoint_url(get("BEDROCK_ENDPOINT_URL"))
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build())
    }

    /// Agent id and alias id, or a configuration error naming what is missing.
    pub fn require_agent(&self) -> Result<(&str, &str), RelayError> {
        match (self.agent_id.as_deref(), self.agent_alias_id.as_deref()) {
            (Some(id), Some(alias)) => Ok((id, alias)),
            (None, _) => Err(RelayError::Configuration("missing AGENT_ID".into())),
            (_, None) => Err(RelayError::Configuration("missing AGENT_ALIAS_ID".into())),
        }
    }

    /// Flow id and alias id, or a configuration error naming what is missing.
    pub fn require_flow(&self) -> Result<(&str, &str), RelayError> {
        match (self.flow_id.as_deref(), self.flow_alias_id.as_deref()) {
            (Some(id), Some(alias)) => Ok((id, alias)),
            (None, _) => Err(RelayError::Configuration("missing FLOW_ID".into())),
            (_, None) => Err(RelayError::Configuration("missing FLOW_ALIAS_ID".into())),
        }
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, RelayError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| RelayError::Configuration(format!("{key} must be whole seconds, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_uses_defaults() {
        let config = RelayConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(120));
        assert!(config.enable_trace);
        assert!(!config.end_session);
        assert_eq!(config.flow_input_node, "FlowInputNode");
        assert_eq!(config.flow_input_output, "document");
        assert!(config.agent_id.is_none());
    }

    #[test]
    fn reads_identifiers_and_timeouts() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("AGENT_ID", "AGENT123"),
            ("AGENT_ALIAS_ID", "ALIAS456"),
            ("FLOW_ID", "FLOW1"),
            ("FLOW_ALIAS_ID", "FALIAS1"),
            ("AWS_REGION", "us-east-1"),
            ("RELAY_READ_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.require_agent().unwrap(), ("AGENT123", "ALIAS456"));
        assert_eq!(config.require_flow().unwrap(), ("FLOW1", "FALIAS1"));
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = RelayConfig::from_lookup(lookup_from(&[("AGENT_ID", "  ")])).unwrap();
        assert!(config.agent_id.is_none());
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = RelayConfig::from_lookup(lookup_from(&[("RELAY_CONNECT_TIMEOUT_SECS", "ten")]))
            .unwrap_err();
        assert!(matches!(
            err,
            RelayError::Configuration(msg) if msg.contains("RELAY_CONNECT_TIMEOUT_SECS")
        ));
    }

    #[test]
    fn require_agent_names_missing_alias() {
        let config = RelayConfig::builder().agent_id("AGENT123").build();
        let err = config.require_agent().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: missing AGENT_ALIAS_ID");
    }
}
