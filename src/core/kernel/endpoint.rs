/// Data center used when the API key carries no `-{dc}` suffix
pub const DEFAULT_DATA_CENTER: &str = "us1";
/// API host, prefixed by the data center
pub const API_HOST: &str = "api.mailchimp.com";
/// Marketing API version segment
pub const API_VERSION: &str = "3.0";

/// Extract the data center from an API key such as `0123abcd-us6`.
///
/// Takes everything after the last hyphen. Keys without a hyphen, or with
/// nothing after it, map to [`DEFAULT_DATA_CENTER`]. The suffix is not checked
/// against a list of known regions.
pub fn data_center(api_key: &str) -> &str {
    match api_key.rsplit_once('-') {
        Some((_, dc)) if !dc.is_empty() => dc,
        _ => DEFAULT_DATA_CENTER,
    }
}

/// Resolve the regional base URL for an API key: `https://{dc}.api.mailchimp.com/3.0`
pub fn resolve(api_key: &str) -> String {
    format!(
        "https://{}.{}/{}",
        data_center(api_key.trim()),
        API_HOST,
        API_VERSION
    )
}
