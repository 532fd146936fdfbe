use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::errors::PredictionError;

/// An independent record store. Each category is uploaded to and queried on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Offers,
    EmailCreatives,
    Campaigns,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Offers,
        Category::EmailCreatives,
        Category::Campaigns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Offers => "offers",
            Category::EmailCreatives => "email_creatives",
            Category::Campaigns => "campaigns",
        }
    }

    /// Singular noun used in human-facing messages ("offer data uploaded").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Offers => "offer",
            Category::EmailCreatives => "email",
            Category::Campaigns => "campaign",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PredictionError;

    /// Accepts both the URL segment (`email`) and the canonical name (`email_creatives`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_ref() {
            "offers" => Ok(Category::Offers),
            "email" | "email_creatives" => Ok(Category::EmailCreatives),
            "campaigns" => Ok(Category::Campaigns),
            _ => Err(PredictionError::UnknownCategory(s.to_owned())),
        }
    }
}
