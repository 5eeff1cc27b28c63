use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

/// Name of the counter record speaker identifiers are drawn from
pub const SPEAKER_ID_COUNTER: &str = "speaker_id";

/// Field of the counter record holding the most recently issued number
pub const LAST_ISSUED_FIELD: &str = "lastIssuedValue";

const PREFIX: &str = "id";

/// Human-readable speaker identifier, rendered as `id<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct SpeakerId(i64);

impl SpeakerId {
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    pub fn number(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid speaker id: {0:?}")]
pub struct InvalidSpeakerId(pub String);

impl FromStr for SpeakerId {
    type Err = InvalidSpeakerId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(PREFIX)
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .filter(|d| d.len() == 1 || !d.starts_with('0'))
            .ok_or_else(|| InvalidSpeakerId(s.to_string()))?;

        digits
            .parse::<i64>()
            .map(SpeakerId)
            .map_err(|_| InvalidSpeakerId(s.to_string()))
    }
}

impl Serialize for SpeakerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpeakerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Counter record document for a given last issued number
pub fn counter_document(last_issued: i64) -> JsonValue {
    json!({ LAST_ISSUED_FIELD: last_issued })
}

/// Extract the last issued number from a stored counter document.
///
/// Integer strings and whole-number floats are accepted since document
/// stores happily hold them; anything else is reported as the reason the
/// record is unusable.
pub fn decode_last_issued(document: &JsonValue) -> Result<i64, String> {
    match document.get(LAST_ISSUED_FIELD) {
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| format!("non-integer value {}", n)),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("non-numeric value {:?}", s)),
        Some(other) => Err(format!("unexpected value {}", other)),
        None => Err(format!("missing {} field", LAST_ISSUED_FIELD)),
    }
}
