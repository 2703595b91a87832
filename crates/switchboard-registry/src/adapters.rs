//! Generic HTTP adapter covering OpenAI-style cloud and local endpoints.
//!
//! One parameterized adapter serves nearly every provider in the table:
//! presence checks (API key / base URL), an absolute-URL check that
//! short-circuits the field checks, an optional live-reachability probe
//! against the `/models` endpoint, model and voice discovery, and model
//! pulling for local servers.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use switchboard_core::types::LoadProgress;
use switchboard_core::{ModelInfo, ProviderConfig, ValidationOutcome, VoiceInfo};

use crate::descriptor::{ProgressSink, ProviderAdapter, ProviderClient};

/// Per-request timeout for validation probes.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Remediation hint appended when a local server cannot be reached.
const LOCAL_HINT: &str = " (is the server running? For local servers also check that \
cross-origin requests are allowed, e.g. OLLAMA_ORIGINS=*)";

// ─────────────────────────────────────────────
// Availability gating
// ─────────────────────────────────────────────

/// How an adapter decides whether its provider is offered at all in the
/// current environment.
#[derive(Clone, Copy, Debug)]
pub enum Availability {
    /// Always offered.
    Always,
    /// Offered only when the named env var is set to a non-empty value.
    EnvFlag(&'static str),
    /// Offered only on the listed operating systems (`std::env::consts::OS`).
    Platforms(&'static [&'static str]),
}

// ─────────────────────────────────────────────
// HttpAdapter
// ─────────────────────────────────────────────

/// Adapter for any provider speaking an OpenAI-compatible HTTP surface.
pub struct HttpAdapter {
    /// Default API base URL, used when the stored config has none.
    default_base: Option<&'static str>,
    /// Whether validation requires a non-empty API key.
    requires_api_key: bool,
    /// Whether validation requires an explicitly stored base URL.
    requires_base_url: bool,
    /// Whether validation issues a live `GET {base}/models` probe after the
    /// presence checks pass.
    probe: bool,
    /// Append the local-server remediation hint to unreachable-probe reasons.
    local_hint: bool,
    /// Path of the voice-listing endpoint, relative to the base URL.
    voices_path: Option<&'static str>,
    /// Path of the model-pull endpoint, relative to the server root (the
    /// base URL with a trailing `/v1` stripped).
    pull_path: Option<&'static str>,
    availability: Availability,
    client: reqwest::Client,
}

impl HttpAdapter {
    fn new(default_base: Option<&'static str>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            default_base,
            requires_api_key: false,
            requires_base_url: false,
            probe: false,
            local_hint: false,
            voices_path: None,
            pull_path: None,
            availability: Availability::Always,
            client,
        }
    }

    /// Hosted provider: API key required, presence-only validation.
    pub fn cloud(default_base: &'static str) -> Self {
        Self {
            requires_api_key: true,
            ..Self::new(Some(default_base))
        }
    }

    /// Hosted provider whose validation also probes the live endpoint.
    pub fn cloud_probed(default_base: &'static str) -> Self {
        Self {
            probe: true,
            ..Self::cloud(default_base)
        }
    }

    /// Self-hosted server: no API key, stored base URL required, validation
    /// probes the live endpoint and failure reasons carry the local hint.
    pub fn local(default_base: &'static str) -> Self {
        Self {
            requires_base_url: true,
            probe: true,
            local_hint: true,
            ..Self::new(Some(default_base))
        }
    }

    /// Require an explicitly stored base URL in addition to the other checks.
    pub fn require_base_url(mut self) -> Self {
        self.requires_base_url = true;
        self
    }

    /// Enable voice discovery at `path` (relative to the base URL).
    pub fn with_voices_path(mut self, path: &'static str) -> Self {
        self.voices_path = Some(path);
        self
    }

    /// Enable model pulling at `path` (relative to the server root).
    pub fn with_pull_path(mut self, path: &'static str) -> Self {
        self.pull_path = Some(path);
        self
    }

    /// Gate the provider's availability on the environment.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Resolve the base URL: stored config wins over the adapter default.
    fn effective_base(&self, config: &ProviderConfig) -> Option<String> {
        config
            .base_url_trimmed()
            .filter(|u| !u.is_empty())
            .or(self.default_base.map(|b| b.trim_end_matches('/')))
            .map(String::from)
    }

    /// Issue the live-reachability probe against `{base}/models`.
    async fn probe_models(&self, base: &str, config: &ProviderConfig) -> ValidationOutcome {
        let url = format!("{base}/models");
        let mut request = self
            .client
            .get(&url)
            .headers(extra_headers(config))
            .timeout(PROBE_TIMEOUT);
        if config.has_api_key() {
            request = request.bearer_auth(&config.api_key);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url = %url, "validation probe ok");
                ValidationOutcome::ok()
            }
            Ok(response) => ValidationOutcome::fail(format!(
                "probe of {url} returned HTTP {}",
                response.status()
            )),
            Err(e) => {
                let mut reason = format!("could not reach {url}: {e}");
                if self.local_hint {
                    reason.push_str(LOCAL_HINT);
                }
                ValidationOutcome::fail(reason)
            }
        }
    }

    fn pull_url(&self, base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches("/v1"), path)
    }
}

#[async_trait]
impl ProviderAdapter for HttpAdapter {
    fn default_options(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.default_base.map(String::from),
            ..Default::default()
        }
    }

    async fn validate(&self, config: &ProviderConfig) -> ValidationOutcome {
        // A malformed base URL short-circuits the field-presence checks
        if let Some(raw) = config.base_url.as_deref().filter(|u| !u.is_empty()) {
            if let Err(reason) = check_absolute_url(raw) {
                return ValidationOutcome::fail(reason);
            }
        }

        let mut errors = Vec::new();
        if self.requires_api_key && !config.has_api_key() {
            errors.push("API key is required".to_string());
        }
        if self.requires_base_url && !config.has_base_url() {
            errors.push("base URL is required".to_string());
        }
        if !errors.is_empty() {
            return ValidationOutcome::fail_all(errors);
        }

        if !self.probe {
            return ValidationOutcome::ok();
        }
        match self.effective_base(config) {
            Some(base) => self.probe_models(&base, config).await,
            None => ValidationOutcome::fail("no base URL configured"),
        }
    }

    async fn list_models(&self, config: &ProviderConfig) -> anyhow::Result<Vec<ModelInfo>> {
        let base = self
            .effective_base(config)
            .ok_or_else(|| anyhow::anyhow!("no base URL configured"))?;
        let url = format!("{base}/models");

        let mut request = self.client.get(&url).headers(extra_headers(config));
        if config.has_api_key() {
            request = request.bearer_auth(&config.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("model listing at {url} returned HTTP {status}");
        }

        let json: serde_json::Value = response.json().await?;
        // OpenAI-style `{"data": [...]}`; some local servers answer `{"models": [...]}`
        let items = json
            .get("data")
            .or_else(|| json.get("models"))
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let models = items
            .iter()
            .filter_map(|item| {
                let id = item
                    .get("id")
                    .or_else(|| item.get("name"))
                    .and_then(|v| v.as_str())?;
                let mut model = ModelInfo::new(id);
                if let Some(name) = item.get("display_name").and_then(|v| v.as_str()) {
                    model.name = name.to_string();
                }
                if let Some(len) = item.get("context_length").and_then(|v| v.as_u64()) {
                    model.context_length = Some(len as u32);
                }
                Some(model)
            })
            .collect::<Vec<_>>();

        debug!(url = %url, count = models.len(), "models listed");
        Ok(models)
    }

    async fn list_voices(&self, config: &ProviderConfig) -> anyhow::Result<Vec<VoiceInfo>> {
        let base = self
            .effective_base(config)
            .ok_or_else(|| anyhow::anyhow!("no base URL configured"))?;
        let url = format!("{base}{}", self.voices_path.unwrap_or("/voices"));

        let mut request = self.client.get(&url).headers(extra_headers(config));
        if config.has_api_key() {
            request = request.bearer_auth(&config.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("voice listing at {url} returned HTTP {status}");
        }

        let json: serde_json::Value = response.json().await?;
        let items = json
            .get("voices")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let voices = items
            .iter()
            .filter_map(|item| {
                let id = item
                    .get("voice_id")
                    .or_else(|| item.get("id"))
                    .and_then(|v| v.as_str())?;
                let name = item.get("name").and_then(|v| v.as_str()).unwrap_or(id);
                Some(VoiceInfo {
                    id: id.to_string(),
                    name: name.to_string(),
                    provider: String::new(),
                    languages: item
                        .get("languages")
                        .and_then(|v| v.as_array())
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|l| l.as_str().map(String::from))
                                .collect()
                        })
                        .unwrap_or_default(),
                    gender: item
                        .pointer("/labels/gender")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                    preview_url: item
                        .get("preview_url")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                })
            })
            .collect::<Vec<_>>();

        debug!(url = %url, count = voices.len(), "voices listed");
        Ok(voices)
    }

    async fn load_model(
        &self,
        config: &ProviderConfig,
        model: &str,
        progress: ProgressSink,
    ) -> anyhow::Result<()> {
        let Some(path) = self.pull_path else {
            anyhow::bail!("loading model '{model}' is not supported by this provider");
        };
        let base = self
            .effective_base(config)
            .ok_or_else(|| anyhow::anyhow!("no base URL configured"))?;
        let url = self.pull_url(&base, path);

        progress(LoadProgress {
            model: model.to_string(),
            phase: "pulling".to_string(),
        });

        let response = self
            .client
            .post(&url)
            .headers(extra_headers(config))
            .json(&serde_json::json!({ "name": model, "stream": false }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("model pull at {url} returned HTTP {status}");
        }

        progress(LoadProgress {
            model: model.to_string(),
            phase: "done".to_string(),
        });
        Ok(())
    }

    async fn is_available(&self) -> anyhow::Result<bool> {
        Ok(match self.availability {
            Availability::Always => true,
            Availability::EnvFlag(var) => {
                std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false)
            }
            Availability::Platforms(list) => list.contains(&std::env::consts::OS),
        })
    }

    async fn create_client(
        &self,
        id: &str,
        config: &ProviderConfig,
    ) -> anyhow::Result<Box<dyn ProviderClient>> {
        if self.requires_api_key && !config.has_api_key() {
            anyhow::bail!("API key is required");
        }
        let base = self
            .effective_base(config)
            .ok_or_else(|| anyhow::anyhow!("no base URL configured"))?;

        let mut headers = extra_headers(config);
        if config.has_api_key() {
            let bearer = format!("Bearer {}", config.api_key);
            if let Ok(value) = HeaderValue::from_str(&bearer) {
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .default_headers(headers)
            .build()?;

        Ok(Box::new(HttpHandle {
            provider_id: id.to_string(),
            base_url: base,
            client,
        }))
    }
}

// ─────────────────────────────────────────────
// Client handle
// ─────────────────────────────────────────────

/// Opaque, connection-pooled handle bound to one provider endpoint.
#[derive(Debug)]
pub struct HttpHandle {
    provider_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpHandle {
    /// The pre-authenticated HTTP client for callers driving the vendor API.
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }
}

impl ProviderClient for HttpHandle {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

/// Build a header map from the config's free-form header entries.
fn extra_headers(config: &ProviderConfig) -> HeaderMap {
    let mut map = HeaderMap::new();
    let Some(headers) = &config.headers else {
        return map;
    };
    for (key, value) in headers {
        if let (Ok(name), Ok(val)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            map.insert(name, val);
        } else {
            warn!(header = %key, "skipping invalid header");
        }
    }
    map
}

/// Require `raw` to be an absolute http(s) URL with a host.
fn check_absolute_url(raw: &str) -> Result<(), String> {
    let not_absolute = || format!("'{raw}' is not an absolute URL (scheme and host required)");
    let parsed = reqwest::Url::parse(raw).map_err(|_| not_absolute())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(not_absolute());
    }
    Ok(())
}

/// Headers map helper for building configs in one expression.
pub fn header_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key_and_base_adapter() -> HttpAdapter {
        HttpAdapter::cloud("https://api.test.dev/v1").require_base_url()
    }

    // ── Presence validation ──

    #[tokio::test]
    async fn test_validate_both_fields_missing() {
        let adapter = key_and_base_adapter();
        let outcome = adapter.validate(&ProviderConfig::default()).await;
        assert!(!outcome.valid);
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors.iter().any(|e| e.contains("API key")));
        assert!(outcome.errors.iter().any(|e| e.contains("base URL")));
    }

    #[tokio::test]
    async fn test_validate_key_only_still_cites_base_url() {
        let adapter = key_and_base_adapter();
        let outcome = adapter
            .validate(&ProviderConfig::with_api_key("sk-123"))
            .await;
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["base URL is required".to_string()]);
    }

    #[tokio::test]
    async fn test_validate_non_absolute_url_short_circuits() {
        let adapter = key_and_base_adapter();
        // api key is also missing, but the URL problem must win
        let outcome = adapter
            .validate(&ProviderConfig::with_base_url("api.example.com"))
            .await;
        assert!(!outcome.valid);
        assert!(outcome.reason.as_deref().unwrap().contains("not an absolute URL"));
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_validate_presence_only_passes_without_network() {
        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let outcome = adapter
            .validate(&ProviderConfig::with_api_key("sk-123"))
            .await;
        assert_eq!(outcome, ValidationOutcome::ok());
    }

    #[test]
    fn test_check_absolute_url() {
        assert!(check_absolute_url("http://localhost:11434/v1").is_ok());
        assert!(check_absolute_url("https://api.openai.com/v1/").is_ok());
        assert!(check_absolute_url("api.example.com").is_err());
        assert!(check_absolute_url("localhost:8080").is_err());
        assert!(check_absolute_url("ftp://example.com").is_err());
    }

    // ── Live-reachability probe ──

    #[tokio::test]
    async fn test_probe_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&server)
            .await;

        let adapter = HttpAdapter::local("http://localhost:1/v1");
        let config = ProviderConfig::with_base_url(format!("{}/v1/", server.uri()));
        let outcome = adapter.validate(&config).await;
        assert!(outcome.valid, "reason: {:?}", outcome.reason);
    }

    #[tokio::test]
    async fn test_probe_http_error_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let adapter = HttpAdapter::local("http://localhost:1/v1");
        let config = ProviderConfig::with_base_url(format!("{}/v1", server.uri()));
        let outcome = adapter.validate(&config).await;
        assert!(!outcome.valid);
        assert!(outcome
            .reason
            .as_deref()
            .unwrap()
            .contains("500 Internal Server Error"));
    }

    #[tokio::test]
    async fn test_probe_unreachable_gets_local_hint() {
        let adapter = HttpAdapter::local("http://localhost:1/v1");
        let config = ProviderConfig::with_base_url("http://127.0.0.1:1/v1");
        let outcome = adapter.validate(&config).await;
        assert!(!outcome.valid);
        assert!(outcome.reason.as_deref().unwrap().contains("OLLAMA_ORIGINS"));
    }

    #[tokio::test]
    async fn test_probe_sends_bearer_and_extra_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("Authorization", "Bearer sk-123"))
            .and(header("X-App-Code", "switchboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&server)
            .await;

        let adapter = HttpAdapter::cloud_probed("https://api.test.dev/v1");
        let config = ProviderConfig {
            api_key: "sk-123".to_string(),
            base_url: Some(server.uri()),
            headers: Some(header_map(&[("X-App-Code", "switchboard")])),
            ..Default::default()
        };
        let outcome = adapter.validate(&config).await;
        assert!(outcome.valid, "reason: {:?}", outcome.reason);
    }

    // ── Model discovery ──

    #[tokio::test]
    async fn test_list_models_openai_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "id": "gpt-4o", "owned_by": "openai" },
                    { "id": "gpt-4o-mini", "context_length": 128000 }
                ]
            })))
            .mount(&server)
            .await;

        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let config = ProviderConfig {
            api_key: "sk-123".to_string(),
            base_url: Some(server.uri()),
            ..Default::default()
        };
        let models = adapter.list_models(&config).await.unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].id, "gpt-4o");
        assert_eq!(models[1].context_length, Some(128000));
    }

    #[tokio::test]
    async fn test_list_models_local_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [ { "name": "llama3.2:3b" } ]
            })))
            .mount(&server)
            .await;

        let adapter = HttpAdapter::local("http://localhost:1/v1");
        let config = ProviderConfig::with_base_url(server.uri());
        let models = adapter.list_models(&config).await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "llama3.2:3b");
    }

    #[tokio::test]
    async fn test_list_models_http_error_is_err() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let config = ProviderConfig {
            api_key: "bad".to_string(),
            base_url: Some(server.uri()),
            ..Default::default()
        };
        let err = adapter.list_models(&config).await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    // ── Voice discovery ──

    #[tokio::test]
    async fn test_list_voices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/voices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "voices": [
                    {
                        "voice_id": "rachel",
                        "name": "Rachel",
                        "labels": { "gender": "female" },
                        "preview_url": "https://cdn.test/rachel.mp3"
                    },
                    { "id": "fin", "name": "Fin", "languages": ["en", "ga"] }
                ]
            })))
            .mount(&server)
            .await;

        let adapter =
            HttpAdapter::cloud("https://api.test.dev/v1").with_voices_path("/voices");
        let config = ProviderConfig {
            api_key: "xi-123".to_string(),
            base_url: Some(server.uri()),
            ..Default::default()
        };
        let voices = adapter.list_voices(&config).await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].id, "rachel");
        assert_eq!(voices[0].gender.as_deref(), Some("female"));
        assert_eq!(voices[1].languages, vec!["en", "ga"]);
    }

    // ── Model pulling ──

    #[tokio::test]
    async fn test_load_model_pulls_at_server_root() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pull"))
            .and(body_partial_json(serde_json::json!({ "name": "llama3.2:3b" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success"
            })))
            .mount(&server)
            .await;

        let adapter =
            HttpAdapter::local("http://localhost:1/v1").with_pull_path("/api/pull");
        let config = ProviderConfig::with_base_url(format!("{}/v1", server.uri()));

        let phases = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink_phases = phases.clone();
        let sink: ProgressSink = Arc::new(move |p: LoadProgress| {
            sink_phases.lock().unwrap().push(p.phase);
        });

        adapter
            .load_model(&config, "llama3.2:3b", sink)
            .await
            .unwrap();
        assert_eq!(*phases.lock().unwrap(), vec!["pulling", "done"]);
    }

    #[tokio::test]
    async fn test_load_model_unsupported() {
        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let sink: ProgressSink = Arc::new(|_| {});
        let err = adapter
            .load_model(&ProviderConfig::with_api_key("k"), "gpt-4o", sink)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }

    // ── Availability ──

    #[tokio::test]
    async fn test_availability_env_flag() {
        let adapter = HttpAdapter::local("http://localhost:1/v1")
            .with_availability(Availability::EnvFlag("SWITCHBOARD_TEST_FLAG_XYZ"));
        assert!(!adapter.is_available().await.unwrap());

        std::env::set_var("SWITCHBOARD_TEST_FLAG_XYZ", "1");
        assert!(adapter.is_available().await.unwrap());
        std::env::remove_var("SWITCHBOARD_TEST_FLAG_XYZ");
    }

    #[tokio::test]
    async fn test_availability_platforms() {
        let here = HttpAdapter::local("http://localhost:1/v1")
            .with_availability(Availability::Platforms(&["linux", "macos", "windows"]));
        assert!(here.is_available().await.unwrap());

        let nowhere = HttpAdapter::local("http://localhost:1/v1")
            .with_availability(Availability::Platforms(&[]));
        assert!(!nowhere.is_available().await.unwrap());
    }

    // ── Client handle ──

    #[tokio::test]
    async fn test_create_client_resolves_default_base() {
        let adapter = HttpAdapter::cloud("https://api.test.dev/v1/");
        let handle = adapter
            .create_client("testprov", &ProviderConfig::with_api_key("sk-123"))
            .await
            .unwrap();
        assert_eq!(handle.provider_id(), "testprov");
        assert_eq!(handle.base_url(), "https://api.test.dev/v1");
    }

    #[tokio::test]
    async fn test_client_handle_is_debuggable() {
        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let handle = adapter
            .create_client("testprov", &ProviderConfig::with_api_key("sk-123"))
            .await
            .unwrap();
        let rendered = format!("{handle:?}");
        assert!(rendered.contains("testprov"));
    }

    #[tokio::test]
    async fn test_create_client_requires_key() {
        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let err = adapter
            .create_client("testprov", &ProviderConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    // ── Defaults & probe-count ──

    #[test]
    fn test_default_options_seed_base_url() {
        let adapter = HttpAdapter::local("http://localhost:11434/v1");
        let defaults = adapter.default_options();
        assert_eq!(defaults.base_url.as_deref(), Some("http://localhost:11434/v1"));
        assert!(!defaults.has_api_key());
    }

    #[tokio::test]
    async fn test_presence_only_validation_makes_no_request() {
        // Presence-only adapters must not hit the endpoint during validation;
        // the mock's expectation is verified when the server drops.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let adapter = HttpAdapter::cloud("https://api.test.dev/v1");
        let config = ProviderConfig {
            api_key: "sk-123".to_string(),
            base_url: Some(server.uri()),
            ..Default::default()
        };
        assert!(adapter.validate(&config).await.valid);
    }
}
