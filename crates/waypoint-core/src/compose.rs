//! Endpoint URL composition

/// Join a configured base endpoint with a call-supplied path.
///
/// Pure string operation, total for well-formed absolute base URLs:
/// repeated slashes at the join point collapse to exactly one, and a
/// non-root path prefix on the base (e.g. `https://host/api`) is
/// preserved. Scheme and port pass through unchanged. A malformed base is
/// a caller contract violation and surfaces later as a transport failure.
pub fn compose(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
