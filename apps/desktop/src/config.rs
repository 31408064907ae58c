use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use client_core::{ConcurrencyPolicy, InputValidation, SubmitPolicy, UnitRule};
use serde::Deserialize;
use shared::{
    domain::{DisasterType, ScenarioInput, DEFAULT_EVENT_COUNT, DEFAULT_POPULATION_BASE},
    protocol::RequestDialect,
};
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dss.toml";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub request_timeout_ms: u64,
    pub population_base: u64,
    pub default_disaster_type: DisasterType,
    pub default_event_count: u64,
    pub request_dialect: RequestDialect,
    pub concurrency: ConcurrencyPolicy,
    pub strict_validation: bool,
    pub max_event_count: u64,
    pub area_unit_tokens: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            request_timeout_ms: client_core::orchestrator::DEFAULT_REQUEST_TIMEOUT.as_millis()
                as u64,
            population_base: DEFAULT_POPULATION_BASE,
            default_disaster_type: DisasterType::default(),
            default_event_count: DEFAULT_EVENT_COUNT,
            request_dialect: RequestDialect::default(),
            concurrency: ConcurrencyPolicy::default(),
            strict_validation: false,
            max_event_count: client_core::orchestrator::DEFAULT_MAX_EVENT_COUNT,
            area_unit_tokens: client_core::projection::DEFAULT_AREA_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
        }
    }
}

/// Shape of `dss.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    request_timeout_ms: Option<u64>,
    population_base: Option<u64>,
    default_disaster_type: Option<String>,
    default_event_count: Option<u64>,
    request_dialect: Option<RequestDialect>,
    concurrency: Option<String>,
    input_validation: Option<String>,
    max_event_count: Option<u64>,
    area_unit_tokens: Option<Vec<String>>,
}

impl Settings {
    pub fn initial_scenario(&self) -> ScenarioInput {
        ScenarioInput {
            disaster_type: self.default_disaster_type,
            event_count: self.default_event_count,
            population_base: self.population_base,
        }
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy {
            concurrency: self.concurrency,
            input_validation: if self.strict_validation {
                InputValidation::Strict {
                    max_event_count: self.max_event_count,
                }
            } else {
                InputValidation::Deferred
            },
            timeout: Duration::from_millis(self.request_timeout_ms),
            dialect: self.request_dialect,
        }
    }

    pub fn unit_rule(&self) -> UnitRule {
        UnitRule::new(self.area_unit_tokens.iter().cloned())
    }

    fn apply_file(&mut self, file: FileSettings) -> anyhow::Result<()> {
        if let Some(v) = file.endpoint {
            self.endpoint = v;
        }
        if let Some(v) = file.request_timeout_ms {
            self.request_timeout_ms = v;
        }
        if let Some(v) = file.population_base {
            self.population_base = v;
        }
        if let Some(v) = file.default_disaster_type {
            self.default_disaster_type = v.parse()?;
        }
        if let Some(v) = file.default_event_count {
            self.default_event_count = v;
        }
        if let Some(v) = file.request_dialect {
            self.request_dialect = v;
        }
        if let Some(v) = file.concurrency {
            self.concurrency = parse_concurrency(&v)?;
        }
        if let Some(v) = file.input_validation {
            self.strict_validation = parse_strict_validation(&v)?;
        }
        if let Some(v) = file.max_event_count {
            self.max_event_count = v;
        }
        if let Some(v) = file.area_unit_tokens {
            self.area_unit_tokens = v;
        }
        Ok(())
    }

    /// Environment overrides. Values that do not parse are logged and skipped.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let first = |keys: &[&str]| keys.iter().rev().find_map(|key| lookup(key));

        if let Some(v) = first(&["DSS_ENDPOINT", "APP__ENDPOINT"]) {
            self.endpoint = v;
        }
        if let Some(v) = first(&["APP__REQUEST_TIMEOUT_MS"]) {
            match v.parse() {
                Ok(parsed) => self.request_timeout_ms = parsed,
                Err(_) => warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_MS"),
            }
        }
        if let Some(v) = first(&["APP__POPULATION_BASE"]) {
            match v.parse() {
                Ok(parsed) => self.population_base = parsed,
                Err(_) => warn!(value = %v, "ignoring APP__POPULATION_BASE"),
            }
        }
        if let Some(v) = first(&["APP__REQUEST_DIALECT"]) {
            match v.parse() {
                Ok(parsed) => self.request_dialect = parsed,
                Err(err) => warn!(%err, "ignoring APP__REQUEST_DIALECT"),
            }
        }
        if let Some(v) = first(&["APP__CONCURRENCY"]) {
            match parse_concurrency(&v) {
                Ok(parsed) => self.concurrency = parsed,
                Err(err) => warn!(%err, "ignoring APP__CONCURRENCY"),
            }
        }
        if let Some(v) = first(&["APP__INPUT_VALIDATION"]) {
            match parse_strict_validation(&v) {
                Ok(parsed) => self.strict_validation = parsed,
                Err(err) => warn!(%err, "ignoring APP__INPUT_VALIDATION"),
            }
        }
        if let Some(v) = first(&["APP__MAX_EVENT_COUNT"]) {
            match v.parse() {
                Ok(parsed) => self.max_event_count = parsed,
                Err(_) => warn!(value = %v, "ignoring APP__MAX_EVENT_COUNT"),
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.endpoint)
            .with_context(|| format!("invalid prediction endpoint '{}'", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("prediction endpoint must use http or https, got '{}'", url.scheme());
        }
        if self.request_timeout_ms == 0 {
            bail!("request_timeout_ms must be greater than zero");
        }
        if self.population_base == 0 {
            bail!("population_base must be positive");
        }
        Ok(())
    }
}

fn parse_concurrency(raw: &str) -> anyhow::Result<ConcurrencyPolicy> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "single_flight" => Ok(ConcurrencyPolicy::SingleFlight),
        "supersede" => Ok(ConcurrencyPolicy::Supersede),
        other => bail!("unknown concurrency policy '{other}' (expected single_flight or supersede)"),
    }
}

fn parse_strict_validation(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "deferred" => Ok(false),
        "strict" => Ok(true),
        other => bail!("unknown input validation mode '{other}' (expected deferred or strict)"),
    }
}

/// Defaults, then the config file, then the environment. An explicitly
/// requested file must exist; the default `dss.toml` is optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    explicit_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            settings
                .apply_file(file)
                .with_context(|| format!("invalid value in config file '{}'", path.display()))?;
        }
        Err(err) if explicit_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    settings.apply_env(lookup);
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
