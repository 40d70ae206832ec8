use serde::{Deserialize, Deserializer};
use serde_json::Value;

// with #[serde(default)] an absent key stays None, while an explicit null becomes Some(Null)
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// the quiz client sends category ids taken from object keys, so they come as strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct LooseId(pub i64);

impl TryFrom<Value> for LooseId {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .map(LooseId)
            .ok_or_else(|| format!("Wrong value {value}, can not parse to i64"))
    }
}
