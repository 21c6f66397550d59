use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
    sync::OnceLock,
};

use actix_web::{HttpMessage, HttpRequest};
use log::{debug, trace};
use regex::Regex;

use crate::{config::ServerOptions, middleware::TraceId};

/// Reported as the caller address when no address could be determined at all.
pub const UNKNOWN_ADDRESS: &str = "unknown";

fn forwarded_for_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)for=(?P<ip>[^;,]+)"#).expect("Forwarded regex is valid"))
}

/// Parses a bare IP, an `ip:port` pair, or a bracketed/quoted IPv6 address as found in proxy headers.
fn parse_ip(s: &str) -> Option<IpAddr> {
    let s = s.trim().trim_matches('"');
    IpAddr::from_str(s)
        .ok()
        .or_else(|| SocketAddr::from_str(s).ok().map(|a| a.ip()))
        .or_else(|| IpAddr::from_str(s.trim_start_matches('[').trim_end_matches(']')).ok())
}

/// Get the remote IP address from the request. It uses 4 sources to determine the IP address, in decreasing order
/// of preference:
/// 1. The left-most entry of the `X-Forwarded-For` header, iif `use_x_forwarded_for` is set in the configuration.
/// 2. The `X-Real-IP` header, iif `use_x_real_ip` is set in the configuration.
/// 3. The `Forwarded` header, iif `use_forwarded` is set in the configuration.
/// 4. The peer address of the connection.
pub fn get_remote_ip(req: &HttpRequest, options: &ServerOptions) -> Option<IpAddr> {
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
    let mut result = None;
    if options.use_x_forwarded_for {
        trace!("Checking X-Forwarded-For header");
        result = header("X-Forwarded-For").and_then(|s| s.split(',').next()).and_then(parse_ip);
        if let Some(ip) = result {
            debug!("Using X-Forwarded-For header for remote address: {ip}");
        }
    }
    if options.use_x_real_ip && result.is_none() {
        trace!("Checking X-Real-IP header");
        result = header("X-Real-IP").and_then(parse_ip);
        if let Some(ip) = result {
            debug!("Using X-Real-IP header for remote address: {ip}");
        }
    }
    if options.use_forwarded && result.is_none() {
        trace!("Checking Forwarded header");
        result = header("Forwarded")
            .and_then(|v| forwarded_for_regex().captures(v))
            .and_then(|caps| caps.name("ip"))
            .and_then(|m| parse_ip(m.as_str()));
        if let Some(ip) = result {
            debug!("Using Forwarded header for remote address: {ip}");
        }
    }
    result.or_else(|| {
        let peer_addr = req.peer_addr().map(|a| a.ip());
        trace!("Using Peer address for remote address: {:?}", peer_addr);
        peer_addr
    })
}

/// The caller address as a string, for handing to the authentication engine.
pub fn caller_address(req: &HttpRequest, options: &ServerOptions) -> String {
    get_remote_ip(req, options).map(|ip| ip.to_string()).unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

/// The trace id assigned by the request context middleware, or `"-"` if the middleware is not installed.
pub fn trace_id(req: &HttpRequest) -> String {
    req.extensions().get::<TraceId>().map(|t| t.0.clone()).unwrap_or_else(|| "-".to_string())
}
