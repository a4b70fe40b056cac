//! Data access port trait.

use crate::domain::bar::PriceBar;
use crate::domain::error::QuantscanError;
use crate::domain::universe::SymbolInfo;
use chrono::NaiveDate;

/// Price-bar provider and instrument registry. `fetch_series` returns the
/// full daily history ascending by trade date with no duplicates; it may be
/// empty for symbols with no history.
pub trait DataPort {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<PriceBar>, QuantscanError>;

    fn list_symbols(&self) -> Result<Vec<SymbolInfo>, QuantscanError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantscanError>;
}
