use bytes::Bytes;
use serde_json::Value;

/// Serialized JSON array of event records, exactly as it is cached and
/// served.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventFeedBody(Bytes);

impl EventFeedBody {
    /// Wraps bytes read back from the cache without inspecting them.
    pub fn from_cached(bytes: Bytes) -> Self { Self(bytes) }

    /// Serializes an event array. Object keys come out in a stable order,
    /// so equal inputs always produce equal bytes.
    pub fn serialize(data: &Value) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(data).map(|vec| Self(Bytes::from(vec)))
    }

    pub fn as_bytes(&self) -> &Bytes { &self.0 }

    pub fn into_bytes(self) -> Bytes { self.0 }
}

impl From<EventFeedBody> for Bytes {
    fn from(body: EventFeedBody) -> Self { body.0 }
}

/// Takes the `data` array out of an upstream response object.
pub fn extract_feed_data(response: Value) -> Option<Value> {
    match response {
        Value::Object(mut object) => {
            object.remove("data").filter(Value::is_array)
        }
        _ => None,
    }
}
