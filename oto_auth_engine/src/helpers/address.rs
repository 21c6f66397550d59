/// Strip an optional port from a configured address, returning the host portion.
///
/// Accepts `host`, `host:port`, `[v6]`, `[v6]:port` and bare IPv6 addresses. A bare IPv6 address is returned as-is,
/// since its colons cannot be told apart from a port separator.
pub fn host_portion(address: &str) -> &str {
    let address = address.trim();
    if let Some(rest) = address.strip_prefix('[') {
        return rest.split_once(']').map_or(rest, |(host, _)| host);
    }
    match address.split_once(':') {
        Some((host, port)) if !port.contains(':') => host,
        _ => address,
    }
}
