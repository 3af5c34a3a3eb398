//! Frontend Configuration
//!
//! Where the row service lives and how chatty the console log is.

use std::str::FromStr;

use log::LevelFilter;

/// Used when neither the build nor the host page names a service
pub const DEFAULT_API_URL: &str = "/api/rows";

/// `<meta name="estimate-api-url" content="...">` in the host page
const API_URL_META: &str = "estimate-api-url";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Row resource root, without a trailing slash
    pub base_url: String,
    pub log_level: LevelFilter,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_sources(None, None, None)
    }
}

impl ApiConfig {
    /// Resolve from build-time variables, then the host page
    pub fn load() -> Self {
        let compiled = option_env!("ESTIMATE_API_URL");
        let page = if compiled.is_none() { page_meta(API_URL_META) } else { None };
        Self::from_sources(compiled, page.as_deref(), option_env!("ESTIMATE_LOG"))
    }

    /// First non-blank URL wins; an unknown level falls back to `info`
    pub fn from_sources(compiled: Option<&str>, page: Option<&str>, level: Option<&str>) -> Self {
        let base_url = [compiled, page]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = level
            .and_then(|l| LevelFilter::from_str(l.trim()).ok())
            .unwrap_or(LevelFilter::Info);

        Self { base_url, log_level }
    }
}

fn page_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()?
        .get_attribute("content")
}
