use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Parse a probe port.
///
/// A valid non-negative integer becomes a numeric port; anything else is
/// kept verbatim as a named port, to be resolved against the container's
/// declared ports at deployment time.
pub fn parse_port(port: &str) -> IntOrString {
    match port.parse::<i32>() {
        Ok(n) if n >= 0 => IntOrString::Int(n),
        _ => IntOrString::String(port.to_string()),
    }
}
