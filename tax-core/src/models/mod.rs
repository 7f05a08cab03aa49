mod filing_status;
mod jurisdiction;
mod tax_bracket;
mod tax_query;
mod tax_result;

pub use filing_status::FilingStatus;
pub use jurisdiction::{JurisdictionTaxSystem, StandardDeduction};
pub use tax_bracket::{Bracket, BracketTable, BracketTableError};
pub use tax_query::TaxQuery;
pub use tax_result::TaxResult;
