//! Configuration management for the course page server
//!
//! Separates the service's startup settings from the resolver configuration
//! that every resolution component receives at construction.

use chrono::FixedOffset;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::{PersonDirectory, PersonRecord};
use crate::course::{CourseRecord, CourseRegistry};
use crate::storage::validation::normalize_lexically;

/// Extensions that may be left off a file's logical path, highest priority first.
pub const DEFAULT_EXPAND_EXTENSIONS: [&str; 4] = [".umber", ".md", ".wiki", ".html"];

/// Name of the per-directory access declaration file.
pub const DEFAULT_ACCESS_FILENAME: &str = ".access.yaml";

pub const DEFAULT_HTTP_PORT: u16 = 8090;
pub const DEFAULT_HTTPS_PORT: u16 = 8443;

/// Complete configuration as read from `config.toml` and the environment
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: StartupConfig,

    pub resolver: ResolverSettings,

    /// Course records standing in for the persistence layer
    #[serde(default)]
    pub courses: Vec<CourseRecord>,

    /// Known people and their roles
    #[serde(default)]
    pub people: Vec<PersonRecord>,
}

/// Settings for the query service (restart required)
#[derive(Debug, Deserialize, Clone)]
pub struct StartupConfig {
    /// IP address to bind the query service
    pub bind_address: String,

    /// Port for the query service
    pub port: u16,

    /// Maximum concurrent clients
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,

    /// Maximum command line length in bytes
    #[serde(default = "default_max_command_length")]
    pub max_command_length: usize,
}

/// Raw resolver settings before validation
#[derive(Debug, Deserialize, Clone)]
pub struct ResolverSettings {
    /// Directory holding one subtree per course
    pub root: String,

    #[serde(default = "default_extensions")]
    pub expand_extensions: Vec<String>,

    #[serde(default = "default_access_filename")]
    pub access_filename: String,

    #[serde(default = "default_http_port")]
    pub http_port: u16,

    #[serde(default = "default_https_port")]
    pub https_port: u16,

    /// Fixed UTC offset such as `-05:00`; the host's local offset when absent
    #[serde(default)]
    pub utc_offset: Option<String>,
}

fn default_max_clients() -> usize {
    32
}

fn default_max_command_length() -> usize {
    1024
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXPAND_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_access_filename() -> String {
    DEFAULT_ACCESS_FILENAME.to_string()
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_https_port() -> u16 {
    DEFAULT_HTTPS_PORT
}

/// Immutable configuration shared by the resolution components.
///
/// The root is absolute and lexically normalised, so boundary checks can
/// compare paths component by component without touching the filesystem.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    root: PathBuf,
    expand_extensions: Vec<String>,
    access_filename: String,
    http_port: u16,
    https_port: u16,
    utc_offset: Option<FixedOffset>,
}

impl ResolverConfig {
    /// Build a configuration rooted at `root` with default settings.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            root: absolute_root(root.as_ref())?,
            expand_extensions: default_extensions(),
            access_filename: default_access_filename(),
            http_port: DEFAULT_HTTP_PORT,
            https_port: DEFAULT_HTTPS_PORT,
            utc_offset: None,
        })
    }

    /// Build and validate a configuration from raw settings.
    pub fn from_settings(settings: &ResolverSettings) -> Result<Self, ConfigError> {
        if settings.root.trim().is_empty() {
            return Err(ConfigError::Message("resolver.root cannot be empty".into()));
        }

        let utc_offset = settings
            .utc_offset
            .as_deref()
            .map(parse_utc_offset)
            .transpose()?;

        let config = Self::new(&settings.root)?
            .with_expand_extensions(settings.expand_extensions.clone())?
            .with_access_filename(&settings.access_filename)?
            .with_ports(settings.http_port, settings.https_port)?
            .with_utc_offset(utc_offset);
        Ok(config)
    }

    /// Replace the extension priority list.
    pub fn with_expand_extensions(mut self, extensions: Vec<String>) -> Result<Self, ConfigError> {
        if extensions.is_empty() {
            return Err(ConfigError::Message(
                "expand_extensions must list at least one extension".into(),
            ));
        }
        if let Some(bad) = extensions
            .iter()
            .find(|ext| ext.len() < 2 || !ext.starts_with('.') || ext.contains('/'))
        {
            return Err(ConfigError::Message(format!(
                "expand_extensions entry {bad:?} must look like \".ext\""
            )));
        }
        self.expand_extensions = extensions;
        Ok(self)
    }

    /// Replace the access declaration filename.
    pub fn with_access_filename(mut self, filename: &str) -> Result<Self, ConfigError> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(ConfigError::Message(format!(
                "access_filename {filename:?} must be a plain file name"
            )));
        }
        self.access_filename = filename.to_string();
        Ok(self)
    }

    /// Replace the insecure and secure ports used for URL synthesis.
    pub fn with_ports(mut self, http_port: u16, https_port: u16) -> Result<Self, ConfigError> {
        if http_port == 0 || https_port == 0 {
            return Err(ConfigError::Message("ports cannot be 0".into()));
        }
        if http_port == https_port {
            return Err(ConfigError::Message(
                "http_port and https_port must differ".into(),
            ));
        }
        self.http_port = http_port;
        self.https_port = https_port;
        Ok(self)
    }

    /// Fix the offset used for timestamps.
    pub fn with_utc_offset(mut self, offset: Option<FixedOffset>) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn expand_extensions(&self) -> &[String] {
        &self.expand_extensions
    }

    pub fn access_filename(&self) -> &str {
        &self.access_filename
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    pub fn https_port(&self) -> u16 {
        self.https_port
    }

    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(root).map_err(|e| {
        ConfigError::Message(format!("cannot resolve root {}: {}", root.display(), e))
    })?;
    Ok(normalize_lexically(&absolute))
}

/// Parse an offset written as `+HH:MM` or `-HH:MM`.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, ConfigError> {
    value
        .trim()
        .parse::<FixedOffset>()
        .map_err(|e| ConfigError::Message(format!("invalid utc_offset {value:?}: {e}")))
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = ["course-page-server/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("COURSE_PAGES").separator("__"))
                .build()
            {
                Ok(settings) => {
                    let config: ServerConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(ConfigError::Message(format!(
            "failed to load config.toml from any location. Tried: {config_paths:?}. Last error: {last_error:?}"
        )))
    }

    /// Split into the service settings and the resolution collaborators
    pub fn split(
        self,
    ) -> Result<(StartupConfig, ResolverConfig, CourseRegistry, PersonDirectory), ConfigError> {
        let resolver = ResolverConfig::from_settings(&self.resolver)?;
        let courses = CourseRegistry::from_records(self.courses);
        let people = PersonDirectory::from_records(self.people);
        Ok((self.server, resolver, courses, people))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Service port cannot be 0".into()));
        }

        if self.server.max_clients == 0 {
            return Err(ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.courses.is_empty() {
            return Err(ConfigError::Message(
                "at least one course must be configured".into(),
            ));
        }

        ResolverConfig::from_settings(&self.resolver).map(|_| ())
    }
}

impl StartupConfig {
    /// Get bind address and port as socket address
    pub fn service_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
