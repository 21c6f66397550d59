//! Server configuration.
//!
//! Everything is read from environment variables (a `.env` file is honoured by `main`). Listener settings fall back
//! to sensible defaults. The member credentials have no defaults: if any required value is missing the server still
//! starts, logs the problem loudly, and answers every transaction request with an internal error until an operator
//! fixes it.
use std::{env, sync::Arc};

use log::*;
use oto_auth_engine::{CredentialProvider, CredentialProviderError, CredentialSet};
use oto_common::parse_boolean_flag;

use crate::errors::ServerError;

const DEFAULT_OTO_HOST: &str = "127.0.0.1";
const DEFAULT_OTO_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// If true, the left-most address in the X-Forwarded-For header is taken as the caller address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the X-Real-IP header is consulted when X-Forwarded-For did not yield an address.
    pub use_x_real_ip: bool,
    /// If true, the `for=` directive of the Forwarded header is consulted as a last resort before the peer address.
    pub use_forwarded: bool,
    /// The member this deployment authenticates transactions for.
    pub member: MemberCredentials,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OTO_HOST.to_string(),
            port: DEFAULT_OTO_PORT,
            use_x_forwarded_for: false,
            use_x_real_ip: false,
            use_forwarded: false,
            member: MemberCredentials::unavailable("No member credentials have been configured"),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. `lookup` returns `None` for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let host = lookup("OTO_HOST").unwrap_or_else(|| DEFAULT_OTO_HOST.into());
        let port = lookup("OTO_PORT")
            .map(|s| {
                s.trim().parse::<u16>().unwrap_or_else(|e| {
                    warn!(
                        "🪛️ {s} is not a valid port for OTO_PORT. {e} Using the default, {DEFAULT_OTO_PORT}, instead."
                    );
                    DEFAULT_OTO_PORT
                })
            })
            .unwrap_or(DEFAULT_OTO_PORT);
        let use_x_forwarded_for = parse_boolean_flag(lookup("OTO_USE_X_FORWARDED_FOR"), false);
        let use_x_real_ip = parse_boolean_flag(lookup("OTO_USE_X_REAL_IP"), false);
        let use_forwarded = parse_boolean_flag(lookup("OTO_USE_FORWARDED"), false);
        let member = match credentials_from_lookup(&lookup) {
            Ok(credentials) => {
                info!(
                    "🪛️ Loaded credentials for member {}. IP checks are {}.",
                    credentials.memberid,
                    if credentials.allow_ip_check_override { "enabled" } else { "DISABLED" }
                );
                MemberCredentials::new(credentials)
            },
            Err(e) => {
                error!(
                    "🪛️ Could not load the member credentials. {e}. The server will start, but every transaction \
                     request will fail with an internal error until this is fixed."
                );
                MemberCredentials::unavailable(e.to_string())
            },
        };
        Self { host, port, use_x_forwarded_for, use_x_real_ip, use_forwarded, member }
    }

    /// Name/value pairs describing the effective configuration. The pin and password only ever appear masked.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let flag = |on: bool| String::from(if on { "on" } else { "off" });
        let mut lines = vec![
            ("OTO_HOST", self.host.clone()),
            ("OTO_PORT", self.port.to_string()),
            ("OTO_USE_X_FORWARDED_FOR", flag(self.use_x_forwarded_for)),
            ("OTO_USE_X_REAL_IP", flag(self.use_x_real_ip)),
            ("OTO_USE_FORWARDED", flag(self.use_forwarded)),
        ];
        match self.member.credentials() {
            Ok(c) => lines.extend([
                ("OTO_MEMBERID", c.memberid.clone()),
                ("OTO_PIN", c.pin.to_string()),
                ("OTO_PASSWORD", c.password.to_string()),
                ("OTO_MEMBERIP", c.allowed_address.clone()),
                ("OTO_MEMBERREPORTURL", c.report_url.clone()),
                ("OTO_ENABLE_IP_CHECK", flag(c.allow_ip_check_override)),
            ]),
            Err(e) => lines.push(("Member credentials", format!("UNAVAILABLE. {e}"))),
        }
        lines
    }
}

/// Reads the member credentials. `OTO_MEMBERID`, `OTO_PIN`, `OTO_PASSWORD` and `OTO_MEMBERIP` are required.
pub fn credentials_from_lookup<F>(lookup: F) -> Result<CredentialSet, ServerError>
where F: Fn(&str) -> Option<String> {
    let required = |name: &str| {
        lookup(name)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| ServerError::ConfigurationError(format!("{name} is not set")))
    };
    let memberid = required("OTO_MEMBERID")?;
    let pin = required("OTO_PIN")?;
    let password = required("OTO_PASSWORD")?;
    let allowed_address = required("OTO_MEMBERIP")?;
    let report_url = lookup("OTO_MEMBERREPORTURL").map(|s| s.trim().to_string()).unwrap_or_default();
    let ip_check = parse_boolean_flag(lookup("OTO_ENABLE_IP_CHECK"), true);
    if !ip_check {
        warn!("🚨️ OTO_ENABLE_IP_CHECK is off. Transaction requests will be accepted from ANY address.");
    }
    Ok(CredentialSet::new(memberid, pin, password)
        .with_allowed_address(allowed_address)
        .with_report_url(report_url)
        .with_ip_check(ip_check))
}

//-------------------------------------------   MemberCredentials   ------------------------------------------------
/// The credentials loaded at start-up, or the reason they could not be loaded.
///
/// Clones share the same underlying credential set.
#[derive(Clone, Debug)]
pub struct MemberCredentials {
    credentials: Result<Arc<CredentialSet>, String>,
}

impl MemberCredentials {
    pub fn new(credentials: CredentialSet) -> Self {
        Self { credentials: Ok(Arc::new(credentials)) }
    }

    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self { credentials: Err(reason.into()) }
    }

    pub fn is_available(&self) -> bool {
        self.credentials.is_ok()
    }
}

impl CredentialProvider for MemberCredentials {
    fn credentials(&self) -> Result<Arc<CredentialSet>, CredentialProviderError> {
        self.credentials.clone().map_err(CredentialProviderError::NotConfigured)
    }
}

//-------------------------------------------     ServerOptions     ------------------------------------------------
/// The subset of the configuration that request handlers need. Shared with them as app data.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
    pub use_x_real_ip: bool,
    pub use_forwarded: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            use_x_forwarded_for: config.use_x_forwarded_for,
            use_x_real_ip: config.use_x_real_ip,
            use_forwarded: config.use_forwarded,
        }
    }
}
