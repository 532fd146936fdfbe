use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::confidence::ConfidenceLevel;
use crate::ranking::RankResult;
use crate::record::UNKNOWN_NAME;

pub const TOP_OFFER_NAME: &str = "Top Offer";
pub const EMPTY_PROMPT_REPLY: &str = "Please ask a valid question.";

const AT_RISK_KEYWORDS: &[&str] = &["dead", "low", "stop"];
const TOP_PERFORMER_KEYWORDS: &[&str] = &["best", "perform", "90"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    AtRisk,
    TopPerformer,
    Snapshot,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::AtRisk => "AT_RISK",
            Intent::TopPerformer => "TOP_PERFORMER",
            Intent::Snapshot => "SNAPSHOT",
        }
    }
}

/// Keyword match on the lowercased prompt. At-risk keywords win over
/// top-performer keywords when both appear.
pub fn classify_prompt(text: &str) -> Intent {
    let text = text.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if contains_any(AT_RISK_KEYWORDS) {
        Intent::AtRisk
    } else if contains_any(TOP_PERFORMER_KEYWORDS) {
        Intent::TopPerformer
    } else {
        Intent::Snapshot
    }
}

pub fn no_data_reply(category: Category) -> String {
    format!(
        "I don't have enough historical {label} data yet. Please upload {label} data first.",
        label = category.label()
    )
}

pub fn compose_reply(
    intent: Intent,
    category: Category,
    ranked: &RankResult,
    confidence: ConfidenceLevel,
) -> String {
    let label = category.label();
    let count = ranked.count;

    match intent {
        Intent::TopPerformer => format!(
            "Based on {count} historical {label}s, '{name}' is expected to perform best \
             in the next 90 days with an estimated revenue of {revenue}.\n\
             Confidence level: {confidence}.",
            name = ranked.best.name_or(TOP_OFFER_NAME),
            revenue = format_currency(ranked.best.revenue()),
        ),
        Intent::AtRisk => format!(
            "Out of {count} historical {label}s, '{name}' is the weakest \
             with a revenue of {revenue}. Consider pausing or reworking it.\n\
             Confidence level: {confidence}.",
            name = ranked.worst.name_or(UNKNOWN_NAME),
            revenue = format_currency(ranked.worst.revenue()),
        ),
        Intent::Snapshot => format!(
            "Snapshot of {count} historical {label}s:\n\
             - Best: '{best}' ({best_revenue})\n\
             - Median: '{median}' ({median_revenue})\n\
             - Worst: '{worst}' ({worst_revenue})\n\
             Confidence level: {confidence}.",
            best = ranked.best.name_or(TOP_OFFER_NAME),
            best_revenue = format_currency(ranked.best.revenue()),
            median = ranked.median.name_or(UNKNOWN_NAME),
            median_revenue = format_currency(ranked.median.revenue()),
            worst = ranked.worst.name_or(UNKNOWN_NAME),
            worst_revenue = format_currency(ranked.worst.revenue()),
        ),
    }
}

/// `$1,234,567` for whole amounts, `$1,234.50` otherwise.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let amount = amount.abs();

    let cents = (amount * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let grouped = group_thousands(whole);
    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction:02}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("is this offer dead?", Intent::AtRisk)]
    #[test_case("Should we STOP the spring campaign", Intent::AtRisk)]
    #[test_case("which offers are running low", Intent::AtRisk)]
    #[test_case("best performer last 90 days", Intent::TopPerformer)]
    #[test_case("How will it PERFORM?", Intent::TopPerformer)]
    #[test_case("next 90", Intent::TopPerformer)]
    #[test_case("how are things", Intent::Snapshot)]
    #[test_case("", Intent::Snapshot)]
    fn classifies_prompts(prompt: &str, expected: Intent) {
        assert_eq!(classify_prompt(prompt), expected);
    }

    #[test]
    fn at_risk_wins_over_top_performer() {
        assert_eq!(classify_prompt("best offer to stop"), Intent::AtRisk);
    }

    #[test_case(0.0, "$0")]
    #[test_case(999.0, "$999")]
    #[test_case(1000.0, "$1,000")]
    #[test_case(1234567.0, "$1,234,567")]
    #[test_case(1234.5, "$1,234.50")]
    #[test_case(-25000.0, "-$25,000")]
    fn formats_currency(amount: f64, expected: &str) {
        assert_eq!(format_currency(amount), expected);
    }

    fn ranked() -> RankResult {
        let record = |v| serde_json::from_value::<Record>(v).unwrap();
        RankResult {
            best: record(json!({"name": "Summer Blast", "revenue": 52000})),
            median: record(json!({"name": "Evergreen", "revenue": 12500})),
            worst: record(json!({"revenue": 300})),
            count: 3,
        }
    }

    #[test]
    fn top_performer_reply_names_best() {
        let reply = compose_reply(
            Intent::TopPerformer,
            Category::Offers,
            &ranked(),
            ConfidenceLevel::Medium,
        );

        assert!(reply.contains("Based on 3 historical offers"));
        assert!(reply.contains("'Summer Blast' is expected to perform best"));
        assert!(reply.contains("$52,000"));
        assert!(reply.contains("Confidence level: MEDIUM."));
    }

    #[test]
    fn at_risk_reply_names_worst_with_default_name() {
        let reply = compose_reply(
            Intent::AtRisk,
            Category::Campaigns,
            &ranked(),
            ConfidenceLevel::Low,
        );

        assert!(reply.contains("Out of 3 historical campaigns"));
        assert!(reply.contains("'Unknown' is the weakest"));
        assert!(reply.contains("$300"));
        assert!(reply.contains("Confidence level: LOW."));
        assert!(!reply.contains("Summer Blast"));
    }

    #[test]
    fn snapshot_reply_lists_all_three() {
        let reply = compose_reply(
            Intent::Snapshot,
            Category::Offers,
            &ranked(),
            ConfidenceLevel::High,
        );

        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Snapshot of 3 historical offers:",
                "- Best: 'Summer Blast' ($52,000)",
                "- Median: 'Evergreen' ($12,500)",
                "- Worst: 'Unknown' ($300)",
                "Confidence level: HIGH.",
            ]
        );
    }

    #[test]
    fn no_data_reply_mentions_category() {
        assert_eq!(
            no_data_reply(Category::Offers),
            "I don't have enough historical offer data yet. Please upload offer data first."
        );
    }
}
