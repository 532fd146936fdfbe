use std::str::FromStr;

use envconfig::Envconfig;

use crate::prediction::PredictionPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionPolicyKind {
    ConversionRate,
    Uplift,
}

impl FromStr for PredictionPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_ref() {
            "conversion_rate" => Ok(PredictionPolicyKind::ConversionRate),
            "uplift" => Ok(PredictionPolicyKind::Uplift),
            _ => Err(format!(
                "Unknown prediction policy: {s}, must be conversion_rate or uplift"
            )),
        }
    }
}

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "BIND_HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    #[envconfig(default = "false")]
    pub enable_metrics: bool,

    #[envconfig(default = "conversion_rate")]
    pub prediction_policy: PredictionPolicyKind,

    #[envconfig(default = "0.08")]
    pub conversion_rate: f64,

    #[envconfig(default = "1.05")]
    pub clicks_uplift: f64,

    #[envconfig(default = "1.07")]
    pub conversions_uplift: f64,

    #[envconfig(default = "1.10")]
    pub revenue_uplift: f64,
}

impl Config {
    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn policy(&self) -> PredictionPolicy {
        match self.prediction_policy {
            PredictionPolicyKind::ConversionRate => PredictionPolicy::ConversionRate {
                rate: self.conversion_rate,
            },
            PredictionPolicyKind::Uplift => PredictionPolicy::Uplift {
                clicks: self.clicks_uplift,
                conversions: self.conversions_uplift,
                revenue: self.revenue_uplift,
            },
        }
    }

    pub fn default_for_test() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            enable_metrics: false,
            prediction_policy: PredictionPolicyKind::ConversionRate,
            conversion_rate: 0.08,
            clicks_uplift: 1.05,
            conversions_uplift: 1.07,
            revenue_uplift: 1.10,
        }
    }
}
