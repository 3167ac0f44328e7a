use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The cross-step working data of a flow
///
/// This is a wrapper around a JSON value. The engine treats it as an
/// opaque bag: step renderers read and write slices of it, and flow
/// crates deserialize it into their typed draft structures.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DraftData {
    /// The inner JSON value
    pub value: serde_json::Value,
}

impl DraftData {
    /// Create a new draft from a JSON value
    #[inline]
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Create an empty draft (an empty JSON object)
    #[inline]
    pub fn empty() -> Self {
        Self {
            value: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Get the inner JSON value
    #[inline]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a mutable reference to the inner JSON value
    #[inline]
    pub fn as_value_mut(&mut self) -> &mut serde_json::Value {
        &mut self.value
    }

    /// Take ownership of the inner JSON value
    #[inline]
    pub fn into_value(self) -> serde_json::Value {
        self.value
    }

    /// Check if the draft holds nothing (null or an empty object)
    #[inline]
    pub fn is_empty(&self) -> bool {
        match &self.value {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Try to view the draft as a JSON object
    #[inline]
    pub fn as_object(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.value.as_object()
    }

    /// Try to convert the draft to a typed draft structure
    pub fn to<T>(&self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(self.value.clone())
    }

    /// Create a draft from a serializable typed draft structure
    pub fn from<T>(value: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize,
    {
        Ok(Self::new(serde_json::to_value(value)?))
    }

    /// Create an object draft with a single key-value pair
    #[inline]
    pub fn singleton(key: &str, value: serde_json::Value) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(key.to_string(), value);
        Self::new(serde_json::Value::Object(map))
    }
}

impl Default for DraftData {
    fn default() -> Self {
        Self::empty()
    }
}
