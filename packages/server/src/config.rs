//! Environment Configuration
//!
//! Environment-variable helpers shared by the hosted and stdio binaries.

/// Default Fastidious base URL when `FASTIDIOUS_URL` is not set
pub const DEFAULT_FASTIDIOUS_URL: &str = "http://localhost:3000";

/// Default listen port for the hosted server when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3001;

/// Listen port from the `PORT` environment variable, or the default
pub fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Fastidious base URL from the `FASTIDIOUS_URL` environment variable, or
/// the default
pub fn fastidious_url() -> String {
    std::env::var("FASTIDIOUS_URL").unwrap_or_else(|_| DEFAULT_FASTIDIOUS_URL.to_string())
}
