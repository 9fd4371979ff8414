use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

/// One event as the Graph API returns it for a group's `/events` edge.
///
/// The gateway never decodes the feed into this type; it documents the
/// response schema and fixes the list of fields requested upstream.
#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder, ToSchema,
)]
pub struct EventRecord {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 timestamp with offset, e.g. `2019-05-02T18:00:00-0700`
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub cover: Option<Value>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub place: Option<Value>,
    #[builder(default)]
    #[serde(default)]
    pub is_canceled: bool,
}

impl EventRecord {
    /// Fields requested from the upstream API, in request order.
    pub const FIELDS: [&'static str; 8] = [
        "name",
        "description",
        "start_time",
        "id",
        "cover",
        "place",
        "end_time",
        "is_canceled",
    ];
}
