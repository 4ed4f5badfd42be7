//! URL joining and normalization for distribution endpoints

use url::Url;

use crate::error::{Result, UpdateError};

/// Join a base URL and a relative path with exactly one separator.
///
/// The base is parsed and normalized first (`url` lowercases the scheme and
/// host and drops default ports), so `HTTP://Example.COM:80/dist` and
/// `http://example.com/dist/` join identically.
pub fn join_url(base: &str, path: &str) -> Result<String> {
    let trimmed = base.trim_end_matches('/');
    let parsed = Url::parse(&format!("{trimmed}/"))
        .map_err(|e| UpdateError::parse(format!("invalid base URL '{base}': {e}")))?;
    let joined = parsed
        .join(path.trim_start_matches('/'))
        .map_err(|e| UpdateError::parse(format!("invalid URL path '{path}': {e}")))?;
    Ok(joined.to_string())
}
