//! Client for the Facebook Graph API, exposed to the rest of the workspace
//! only through the [`UpstreamSource`] capability.

pub mod client;
pub mod config;
pub mod source;

pub use client::GraphApiClient;
pub use config::GraphApiConfig;
pub use source::{AccessToken, UpstreamError, UpstreamSource};
