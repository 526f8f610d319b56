//! Loader for bakecast configuration with YAML + environment overlays.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (`twitter` credentials have none)
//! 2. a YAML/TOML/JSON file (`bakecast.yaml` by default, optional)
//! 3. `BAKECAST__SECTION__KEY` environment variables
//!
//! String values may reference other environment variables as `${VAR}`;
//! they are expanded recursively before typed deserialization, so secrets
//! never need to live in the file itself.
use bakecast_common::LogFormat;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

const DEFAULT_ENDPOINT: &str = "https://public-api.wordpress.com/rest/v1.1/";

#[derive(Debug, Deserialize)]
pub struct BakecastConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Required unless the loader is told credentials are optional (dry runs).
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where recipes come from and how the primary image is recognised.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_site")]
    pub site: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default = "default_number", deserialize_with = "de_lenient_u32")]
    pub number: u32,
    #[serde(default = "default_order")]
    pub order: String,
    #[serde(default = "default_image_marker")]
    pub image_marker: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            endpoint: default_endpoint(),
            post_type: default_post_type(),
            number: default_number(),
            order: default_order(),
            image_marker: default_image_marker(),
        }
    }
}

/// OAuth 1.0a user-context credentials.
#[derive(Clone, Default, Deserialize)]
pub struct TwitterConfig {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_secret: String,
}

impl fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs", deserialize_with = "de_lenient_u64")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
            dir: None,
        }
    }
}

fn default_site() -> String {
    "bakingbrew.com".into()
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_post_type() -> String {
    "recipe".into()
}
fn default_number() -> u32 {
    100
}
fn default_order() -> String {
    "DESC".into()
}
fn default_image_marker() -> String {
    "main.jpg".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_filter() -> String {
    "info".into()
}

// Environment overrides arrive as strings; accept both shapes for numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Num(u64),
    Str(String),
}

fn de_lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    match Lenient::deserialize(d)? {
        Lenient::Num(n) => Ok(n),
        Lenient::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn de_lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let n = de_lenient_u64(d)?;
    u32::try_from(n).map_err(serde::de::Error::custom)
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

impl BakecastConfig {
    /// Reject nonsensical query knobs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.site.trim().is_empty() {
            return Err(ConfigError::Message("source.site is empty".into()));
        }
        if self.source.image_marker.is_empty() {
            return Err(ConfigError::Message("source.image_marker is empty".into()));
        }
        if self.source.number == 0 {
            return Err(ConfigError::Message("source.number must be at least 1".into()));
        }
        Ok(())
    }

    /// Reject empty or still-unexpanded credentials.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        let creds = [
            ("twitter.consumer_key", &self.twitter.consumer_key),
            ("twitter.consumer_secret", &self.twitter.consumer_secret),
            ("twitter.access_token", &self.twitter.access_token),
            ("twitter.access_token_secret", &self.twitter.access_token_secret),
        ];
        for (key, value) in creds {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("{key} is empty")));
            }
            if value.contains("${") {
                return Err(ConfigError::Message(format!(
                    "{key} references an unset environment variable"
                )));
            }
        }
        Ok(())
    }
}

/// Builder hides the `config` crate wiring (file + env overrides).
pub struct BakecastConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    overrides: Vec<(String, String)>,
    require_credentials: bool,
}

impl Default for BakecastConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BakecastConfigLoader {
    /// Start with `BAKECAST__` env overrides only.
    ///
    /// ```
    /// use bakecast_config::BakecastConfigLoader;
    ///
    /// let config = BakecastConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// twitter:
    ///   consumer_key: ck
    ///   consumer_secret: cs
    ///   access_token: at
    ///   access_token_secret: ats
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.source.post_type, "recipe");
    /// assert_eq!(config.source.number, 100);
    /// assert_eq!(config.source.image_marker, "main.jpg");
    /// ```
    pub fn new() -> Self {
        // Sources added later win, so the env overlay is attached in `load`.
        Self {
            builder: Config::builder(),
            overrides: Vec::new(),
            require_credentials: true,
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped so
    /// env-only deployments work.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Programmatic override for a single key (CLI flags). Overrides beat
    /// every other source.
    pub fn with_override(mut self, key: &str, value: &str) -> Self {
        self.overrides.push((key.to_string(), value.to_string()));
        self
    }

    /// Skip credential checks when nothing will be published (`--dry-run`).
    pub fn require_credentials(mut self, required: bool) -> Self {
        self.require_credentials = required;
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use bakecast_config::BakecastConfigLoader;
    ///
    /// unsafe { std::env::set_var("DOC_CONSUMER_SECRET", "injected-from-env"); }
    ///
    /// let config = BakecastConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// source:
    ///   site: example.blog
    /// twitter:
    ///   consumer_key: ck
    ///   consumer_secret: "${DOC_CONSUMER_SECRET}"
    ///   access_token: at
    ///   access_token_secret: ats
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.source.site, "example.blog");
    /// assert_eq!(config.twitter.consumer_secret, "injected-from-env");
    ///
    /// unsafe { std::env::remove_var("DOC_CONSUMER_SECRET"); }
    /// ```
    pub fn load(self) -> Result<BakecastConfig, ConfigError> {
        let mut builder = self
            .builder
            .add_source(Environment::with_prefix("BAKECAST").separator("__"));
        for (key, value) in self.overrides {
            builder = builder.set_override(key, value)?;
        }
        let cfg = builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: BakecastConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        if self.require_credentials {
            typed.validate_credentials()?;
        }
        Ok(typed)
    }
}
