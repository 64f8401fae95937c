use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::Value;

/// A single guestbook entry. Built only by the store and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    pub timestamp: String,
}

/// Body of `POST /api/messages`.
///
/// `text` is not type checked: whatever JSON value the client sent is kept as-is.
/// `None` means the field was absent, `Some(Value::Null)` means an explicit `null`.
/// An array body carries no `text` field, so it yields `None`.
#[derive(Debug, Default, PartialEq)]
pub struct CreateMessageRequest {
    pub text: Option<Value>,
}

impl<'de> Deserialize<'de> for CreateMessageRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CreateMessageVisitor)
    }
}

struct CreateMessageVisitor;

impl<'de> Visitor<'de> for CreateMessageVisitor {
    type Value = CreateMessageRequest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object or array")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut text = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "text" {
                // Repeated keys: the last one wins.
                text = Some(map.next_value::<Value>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(CreateMessageRequest { text })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(CreateMessageRequest::default())
    }
}
