use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::errors::PredictionError;
use crate::category::Category;
use crate::metrics_consts::{RECORDS_UPLOADED_COUNTER, UPLOADS_REJECTED_COUNTER};
use crate::prediction::{predict, Prediction, PredictionPolicy};
use crate::ranking::{rank, RankResult};
use crate::record::Record;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCounts {
    pub offers: usize,
    pub email_creatives: usize,
    pub campaigns: usize,
}

/// In-memory record storage, one append-only sequence per category.
///
/// Each category sits behind its own lock: uploads hold the write lock for a
/// single `extend`, queries hold the read lock only long enough to clone a
/// snapshot. Everything else runs on the snapshot.
pub struct AggregationStore {
    categories: HashMap<Category, RwLock<Vec<Record>>>,
}

impl Default for AggregationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationStore {
    pub fn new() -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| (category, RwLock::new(Vec::new())))
            .collect();
        Self { categories }
    }

    /// Validates an uploaded `data` payload and appends it to the category.
    /// Returns the category's new total.
    ///
    /// The payload must be an array of objects. On any other shape nothing is
    /// appended.
    pub fn upload(&self, category: Category, data: Value) -> Result<usize, PredictionError> {
        let records = match parse_records(data) {
            Ok(records) => records,
            Err(e) => {
                metrics::counter!(UPLOADS_REJECTED_COUNTER, "category" => category.as_str())
                    .increment(1);
                return Err(e);
            }
        };
        self.append(category, records)
    }

    pub fn append(
        &self,
        category: Category,
        records: Vec<Record>,
    ) -> Result<usize, PredictionError> {
        let uploaded = records.len();
        let mut store = self
            .lock(category)
            .write()
            .map_err(|_| PredictionError::StorePoisoned(category))?;
        store.extend(records);
        let total = store.len();
        drop(store);

        metrics::counter!(RECORDS_UPLOADED_COUNTER, "category" => category.as_str())
            .increment(uploaded as u64);
        debug!(%category, uploaded, total, "records uploaded");

        Ok(total)
    }

    /// A consistent copy of the category's records, in insertion order.
    pub fn snapshot(&self, category: Category) -> Result<Vec<Record>, PredictionError> {
        self.lock(category)
            .read()
            .map(|records| records.clone())
            .map_err(|_| PredictionError::StorePoisoned(category))
    }

    pub fn count(&self, category: Category) -> Result<usize, PredictionError> {
        self.lock(category)
            .read()
            .map(|records| records.len())
            .map_err(|_| PredictionError::StorePoisoned(category))
    }

    pub fn counts(&self) -> Result<DataCounts, PredictionError> {
        Ok(DataCounts {
            offers: self.count(Category::Offers)?,
            email_creatives: self.count(Category::EmailCreatives)?,
            campaigns: self.count(Category::Campaigns)?,
        })
    }

    pub fn rank(&self, category: Category) -> Result<RankResult, PredictionError> {
        let records = self.snapshot(category)?;
        rank(&records).ok_or(PredictionError::NoData(category))
    }

    pub fn predict(
        &self,
        category: Category,
        policy: &PredictionPolicy,
    ) -> Result<Prediction, PredictionError> {
        let records = self.snapshot(category)?;
        predict(&records, policy).ok_or(PredictionError::NoData(category))
    }

    fn lock(&self, category: Category) -> &RwLock<Vec<Record>> {
        // Every category is inserted in `new`.
        &self.categories[&category]
    }
}

fn parse_records(data: Value) -> Result<Vec<Record>, PredictionError> {
    let Value::Array(items) = data else {
        warn!("rejected upload: data is not a list");
        return Err(PredictionError::InvalidInput("Data must be a list".to_owned()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record::new(fields)),
            _ => {
                warn!(index, "rejected upload: element is not an object");
                Err(PredictionError::InvalidInput(format!(
                    "Data must be a list of objects, element {index} is not"
                )))
            }
        })
        .collect()
}
