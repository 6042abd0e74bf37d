//! Absolute request URL construction.

use crate::config::{parse_base_url, REST_PATH};
use crate::query::QueryParams;
use crate::Result;

/// Build `base + REST_PATH + path + "?" + query`.
///
/// The query is form-urlencoded in ascending parameter-name order and left
/// off entirely when `params` is empty. Any query already present on the base
/// URL is replaced.
///
/// # Errors
///
/// Returns [`crate::Error::ConfigError`] if `base_url` is not a usable base URL.
pub fn build_url(base_url: &str, path: &str, params: &QueryParams) -> Result<String> {
    let mut url = parse_base_url(base_url)?;

    let full_path = format!(
        "{}{}{}",
        url.path().trim_end_matches('/'),
        REST_PATH,
        path.trim_start_matches('/')
    );
    url.set_path(&full_path);
    url.set_query(None);

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }

    Ok(url.into())
}
