use std::collections::HashMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Bracket, BracketTable, FilingStatus};
use tracing::debug;

use crate::error::CatalogLoaderError;

/// Maps a schedule code to the filing statuses it covers.
///
/// - `single` → Single
/// - `joint` → Joint
/// - `both` → Single and Joint (jurisdictions that tax individuals only)
fn schedule_to_filing_statuses(
    schedule: &str
) -> Result<&'static [FilingStatus], CatalogLoaderError> {
    match schedule.trim().to_ascii_lowercase().as_str() {
        "single" => Ok(&[FilingStatus::Single]),
        "joint" => Ok(&[FilingStatus::Joint]),
        "both" => Ok(&FilingStatus::ALL),
        _ => Err(CatalogLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from the brackets CSV file.
///
/// - `jurisdiction`: Jurisdiction id (e.g., `US`)
/// - `schedule`: `single`, `joint` or `both`
/// - `min`: Lower bound of the bracket
/// - `max`: Upper bound of the bracket (empty for unlimited)
/// - `base_offset`: Tax owed on all income below `min`
/// - `rate`: Marginal rate as a decimal (e.g., `0.22`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub jurisdiction: String,
    pub schedule: String,
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub base_offset: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Validated bracket tables keyed by jurisdiction id (upper-cased) and
/// filing status.
#[derive(Debug, Default)]
pub struct BracketTables {
    tables: HashMap<(String, FilingStatus), BracketTable>,
}

impl BracketTables {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(
        &self,
        jurisdiction: &str,
        status: FilingStatus,
    ) -> Option<&BracketTable> {
        self.tables
            .get(&(jurisdiction.trim().to_ascii_uppercase(), status))
    }

    /// Removes and returns the table for `jurisdiction` and `status`.
    pub fn take(
        &mut self,
        jurisdiction: &str,
        status: FilingStatus,
    ) -> Option<BracketTable> {
        self.tables
            .remove(&(jurisdiction.trim().to_ascii_uppercase(), status))
    }

    /// Jurisdiction ids that still have tables, sorted and deduplicated.
    pub fn jurisdictions(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.tables.keys().map(|(id, _)| id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Loader for bracket tables from CSV data.
///
/// Each `(jurisdiction, filing status)` group is sorted by `min` and then
/// validated as a [`BracketTable`], so gaps, overlaps and inconsistent
/// offsets are rejected at load time rather than at calculation time.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Group records into validated tables.
    ///
    /// A `both` schedule contributes its rows to the single and the joint
    /// table of that jurisdiction.
    pub fn build(records: &[BracketRecord]) -> Result<BracketTables, CatalogLoaderError> {
        let mut groups: HashMap<(String, FilingStatus), Vec<Bracket>> = HashMap::new();

        for record in records {
            let jurisdiction = record.jurisdiction.trim().to_ascii_uppercase();
            for &status in schedule_to_filing_statuses(&record.schedule)? {
                groups
                    .entry((jurisdiction.clone(), status))
                    .or_default()
                    .push(Bracket {
                        min: record.min,
                        max: record.max,
                        rate: record.rate,
                        base_offset: record.base_offset,
                    });
            }
        }

        let mut tables = HashMap::with_capacity(groups.len());
        for ((jurisdiction, status), mut brackets) in groups {
            brackets.sort_by(|a, b| a.min.cmp(&b.min));
            let table =
                BracketTable::new(brackets).map_err(|source| CatalogLoaderError::InvalidTable {
                    jurisdiction: jurisdiction.clone(),
                    status,
                    source,
                })?;
            debug!(%jurisdiction, %status, brackets = table.len(), "built bracket table");
            tables.insert((jurisdiction, status), table);
        }

        Ok(BracketTables { tables })
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<BracketTables, CatalogLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}
