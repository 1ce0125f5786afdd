//! Configuration module
//!
//! Resolves command-line flags and environment variables into a single
//! [`Config`] value once at startup. Nothing downstream reads the
//! environment directly.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

/// Production origin of the platform
pub const DEFAULT_ORIGIN: &str = "https://www.ectocet.com";

/// Root domain of service URLs on the production platform
pub const DEFAULT_ROOT_DOMAIN: &str = "app.ectocet.com";

/// Root domain of service URLs when the origin is overridden
pub const CUSTOM_ROOT_DOMAIN: &str = "app.ectocet.dev";

/// Environment variable holding the project secret
pub const SECRET_ENV: &str = "ECTOCET_SECRET";

const HELP: &str = "Pushes the current folder to an Ectocet project. \
Needs ECTOCET_SECRET env var (will ask for it if not provided).";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "ectocet", version, about = HELP, long_about = None)]
pub struct CliArgs {
    /// Platform origin (defaults to the production platform)
    #[arg(long, env = "ECTOCET_ORIGIN")]
    pub origin: Option<String>,

    /// Project directory to deploy
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Seconds between two build status checks
    #[arg(long, env = "ECTOCET_POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval: u64,

    /// Give up after this many build status checks (default: wait forever)
    #[arg(long, env = "ECTOCET_MAX_POLL_ATTEMPTS")]
    pub max_poll_attempts: Option<u32>,
}

/// Build polling settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Wait between two checks, including before the first one
    pub interval: Duration,
    /// Upper bound on checks; `None` polls until the build finishes
    pub max_attempts: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Platform origin, without trailing slash
    pub origin: String,
    /// Root domain used to derive service URLs
    pub root_domain: String,
    /// Secret from the environment, if any
    pub secret: Option<String>,
    /// Directory to package
    pub project_dir: PathBuf,
    pub poll: PollSettings,
}

impl Config {
    /// Builds the configuration from parsed flags and the secret found in the
    /// environment
    ///
    /// Empty values count as unset.
    pub fn from_args(args: CliArgs, env_secret: Option<String>) -> Result<Self> {
        let custom_origin = args
            .origin
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty() && origin != DEFAULT_ORIGIN);

        let root_domain = match custom_origin {
            Some(_) => CUSTOM_ROOT_DOMAIN,
            None => DEFAULT_ROOT_DOMAIN,
        };

        let config = Self {
            origin: custom_origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            root_domain: root_domain.to_string(),
            secret: env_secret.filter(|secret| !secret.is_empty()),
            project_dir: args.dir,
            poll: PollSettings {
                interval: Duration::from_secs(args.poll_interval),
                max_attempts: args.max_poll_attempts,
            },
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.origin.starts_with("http://") && !self.origin.starts_with("https://") {
            bail!("origin must start with http:// or https://");
        }

        if self.poll.interval.is_zero() {
            bail!("poll interval must be greater than 0");
        }

        if self.poll.max_attempts == Some(0) {
            bail!("max poll attempts must be greater than 0");
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("origin", &self.origin)
            .field("root_domain", &self.root_domain)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("project_dir", &self.project_dir)
            .field("poll", &self.poll)
            .finish()
    }
}
