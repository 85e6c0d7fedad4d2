use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use kauth::oauth::{Endpoints, RefreshTokenTransport};
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Port the backend-to-backend example listens on unless overridden.
pub const DEFAULT_PORT: u16 = 3000;

/// Port the client-side example is hosted on unless overridden.
pub const DEFAULT_CLIENT_SIDE_PORT: u16 = 3001;

/// Base URL of a locally running K-Auth used when no endpoint is configured.
pub const DEFAULT_KAUTH_URL: &str = "http://localhost:4000";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The TCP port the backend-to-backend example listens on
    #[arg(short, long, env, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The TCP port the client-side example is hosted on
    #[arg(long, env, default_value_t = DEFAULT_CLIENT_SIDE_PORT)]
    pub client_side_port: u16,

    /// Public base URI of the backend-to-backend example. K-Auth sends the browser
    /// back here after logging out.
    #[arg(long, env, default_value = "http://localhost:3000")]
    base_uri: String,

    /// Client id registered with K-Auth for the backend-to-backend example
    #[arg(long, env, default_value = "backend-to-backend-example")]
    client_id: String,

    /// Callback URI registered with K-Auth for the backend-to-backend example
    #[arg(long, env, default_value = "http://localhost:3000/callback")]
    redirect_uri: String,

    /// Client id registered with K-Auth for the client-side example
    #[arg(long, env, default_value = "client-side-example")]
    client_side_client_id: String,

    /// Callback URI registered with K-Auth for the client-side example
    #[arg(long, env, default_value = "http://localhost:3001/")]
    client_side_redirect_uri: String,

    /// K-Auth authorization endpoint
    #[arg(long, env)]
    kauth_authorize_url: Option<String>,

    /// K-Auth token endpoint (authorization-code exchange)
    #[arg(long, env)]
    kauth_token_url: Option<String>,

    /// K-Auth refresh endpoint
    #[arg(long, env)]
    kauth_refresh_url: Option<String>,

    /// K-Auth revoke endpoint
    #[arg(long, env)]
    kauth_revoke_url: Option<String>,

    /// K-Auth logout page
    #[arg(long, env)]
    kauth_logout_url: Option<String>,

    /// How the refresh token is sent to the refresh and revoke endpoints. `cookie`
    /// is an interim workaround for K-Auth servers that only read it from a cookie.
    #[arg(
        long,
        env,
        default_value_t = RefreshTokenTransport::Body,
        value_parser = clap::builder::PossibleValuesParser::new(["body", "cookie", "BODY", "COOKIE"])
            .map(|s| s.parse::<RefreshTokenTransport>().unwrap()),
    )]
    pub refresh_token_transport: RefreshTokenTransport,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,

    /// Session expiry duration in seconds of inactivity (default: 1 hour)
    #[arg(long, env, default_value_t = 3600)]
    pub session_expiry_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Point every K-Auth endpoint at `base_url` using the default paths.
    pub fn set_kauth_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.kauth_authorize_url = Some(format!("{base_url}/oauth/authorize"));
        self.kauth_token_url = Some(format!("{base_url}/oauth/token"));
        self.kauth_refresh_url = Some(format!("{base_url}/oauth/refresh"));
        self.kauth_revoke_url = Some(format!("{base_url}/oauth/revoke"));
        self.kauth_logout_url = Some(format!("{base_url}/oauth/logout"));
        self
    }

    /// Returns the K-Auth endpoints, falling back to a local K-Auth for any that are unset.
    pub fn kauth_endpoints(&self) -> Endpoints {
        let default = |path: &str| format!("{DEFAULT_KAUTH_URL}{path}");
        Endpoints {
            authorize_url: self
                .kauth_authorize_url
                .clone()
                .unwrap_or_else(|| default("/oauth/authorize")),
            token_url: self
                .kauth_token_url
                .clone()
                .unwrap_or_else(|| default("/oauth/token")),
            refresh_url: self
                .kauth_refresh_url
                .clone()
                .unwrap_or_else(|| default("/oauth/refresh")),
            revoke_url: self
                .kauth_revoke_url
                .clone()
                .unwrap_or_else(|| default("/oauth/revoke")),
            logout_url: self
                .kauth_logout_url
                .clone()
                .unwrap_or_else(|| default("/oauth/logout")),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn client_side_client_id(&self) -> &str {
        &self.client_side_client_id
    }

    pub fn client_side_redirect_uri(&self) -> &str {
        &self.client_side_redirect_uri
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
