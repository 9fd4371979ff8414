use std::time::Duration;

use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, TypedBuilder)]
pub struct GraphApiConfig {
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    /// Version segment such as `v19.0`; unversioned calls use the app default.
    #[builder(default, setter(strip_option, into))]
    pub version: Option<String>,
    #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
    pub timeout: Duration,
}

impl Default for GraphApiConfig {
    fn default() -> Self { Self::builder().build() }
}
