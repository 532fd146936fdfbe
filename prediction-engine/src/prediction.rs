use serde::{Deserialize, Serialize};

use crate::confidence::confidence_score;
use crate::record::Record;

pub const DEFAULT_CONVERSION_RATE: f64 = 0.08;
pub const DEFAULT_CLICKS_UPLIFT: f64 = 1.05;
pub const DEFAULT_CONVERSIONS_UPLIFT: f64 = 1.07;
pub const DEFAULT_REVENUE_UPLIFT: f64 = 1.10;

/// How per-record means are turned into a prediction.
///
/// Both policies start from the truncated integer mean of each field.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionPolicy {
    /// Clicks and revenue are the plain means; conversions are derived from
    /// the predicted clicks at a fixed rate. The recorded conversions are ignored.
    ConversionRate { rate: f64 },
    /// Each mean is scaled by its own multiplier.
    Uplift {
        clicks: f64,
        conversions: f64,
        revenue: f64,
    },
}

impl Default for PredictionPolicy {
    fn default() -> Self {
        PredictionPolicy::ConversionRate {
            rate: DEFAULT_CONVERSION_RATE,
        }
    }
}

impl PredictionPolicy {
    pub fn default_uplift() -> Self {
        PredictionPolicy::Uplift {
            clicks: DEFAULT_CLICKS_UPLIFT,
            conversions: DEFAULT_CONVERSIONS_UPLIFT,
            revenue: DEFAULT_REVENUE_UPLIFT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_clicks: i64,
    pub predicted_conversions: i64,
    pub predicted_revenue: i64,
    pub confidence: f64,
    pub based_on_records: usize,
}

pub fn predict(records: &[Record], policy: &PredictionPolicy) -> Option<Prediction> {
    if records.is_empty() {
        return None;
    }

    let count = records.len();
    let clicks = mean(records, Record::clicks);
    let conversions = mean(records, Record::conversions);
    let revenue = mean(records, Record::revenue);

    let (predicted_clicks, predicted_conversions, predicted_revenue) = match *policy {
        PredictionPolicy::ConversionRate { rate } => {
            (clicks, truncate(clicks as f64 * rate), revenue)
        }
        PredictionPolicy::Uplift {
            clicks: clicks_uplift,
            conversions: conversions_uplift,
            revenue: revenue_uplift,
        } => (
            truncate(clicks as f64 * clicks_uplift),
            truncate(conversions as f64 * conversions_uplift),
            truncate(revenue as f64 * revenue_uplift),
        ),
    };

    Some(Prediction {
        predicted_clicks,
        predicted_conversions,
        predicted_revenue,
        confidence: confidence_score(count),
        based_on_records: count,
    })
}

/// Truncated arithmetic mean of a numeric field.
fn mean(records: &[Record], field: fn(&Record) -> f64) -> i64 {
    let total: f64 = records.iter().map(field).sum();
    truncate(total / records.len() as f64)
}

fn truncate(value: f64) -> i64 {
    // `as` truncates toward zero and saturates on overflow or NaN.
    value.trunc() as i64
}
