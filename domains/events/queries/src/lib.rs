use events_models::EventRecord;
use serde::Deserialize;

/// Facebook group whose events the gateway serves.
pub const DEFAULT_GROUP_ID: &str = "232675096843082";

#[derive(Debug, Clone, Deserialize)]
pub struct GetEventFeedQuery {
    pub group_id: String,
}

impl GetEventFeedQuery {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
        }
    }

    pub fn resource_path(&self) -> String {
        format!("/{}/events", self.group_id)
    }

    pub fn fields(&self) -> &'static [&'static str] { &EventRecord::FIELDS }
}

impl Default for GetEventFeedQuery {
    fn default() -> Self { Self::new(DEFAULT_GROUP_ID) }
}
