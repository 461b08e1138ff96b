//! Proxy argument derivation.

use url::Url;

/// Expands one proxy URL into the `--proxy-server` value covering both
/// traffic variants: the same endpoint is listed under the `http` and `https`
/// schemes, separated by `;`.
pub fn proxy_server_arg(proxy: &Url) -> String {
    let mut http = proxy.clone();
    let mut https = proxy.clone();
    // set_scheme only rejects special->non-special changes, which cannot
    // happen between http and https.
    let _ = http.set_scheme("http");
    let _ = https.set_scheme("https");

    format!("{};{}", trimmed(&http), trimmed(&https))
}

/// `Url` prints a trailing `/` for an empty path; the browser's proxy flag
/// expects the bare endpoint.
fn trimmed(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
