use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::database::services::SeedReport;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportResultDto {
    /// Snapshot keys that replaced a stored collection
    pub collections: Vec<String>,
    /// Records written across all collections
    pub records: usize,
}

impl ImportResultDto {
    pub fn record(&mut self, collection: &str, count: usize) {
        self.collections.push(collection.to_string());
        self.records += count;
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetResultDto {
    /// Collections filled from fixtures or built-in defaults
    pub seeded: Vec<String>,
}

impl From<SeedReport> for ResetResultDto {
    fn from(report: SeedReport) -> Self {
        Self {
            seeded: report.seeded.into_iter().map(str::to_string).collect(),
        }
    }
}
