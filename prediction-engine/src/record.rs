use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNKNOWN_NAME: &str = "Unknown";

/// One uploaded business event (an offer, an email creative, a campaign).
///
/// Records are open-ended: every field sent by the client is kept as-is, and
/// aggregation only ever looks at `name`, `revenue`, `clicks` and `conversions`.
/// Missing or non-numeric values read as zero at query time, never at upload time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name().unwrap_or(default)
    }

    pub fn revenue(&self) -> f64 {
        self.number("revenue")
    }

    pub fn clicks(&self) -> f64 {
        self.number("clicks")
    }

    pub fn conversions(&self) -> f64 {
        self.number("conversions")
    }

    /// Reads a numeric field, accepting numbers sent as strings.
    /// Only finite values count, so "NaN" or "inf" read as zero.
    pub fn number(&self, field: &str) -> f64 {
        let value = match self.0.get(field) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
