//! Symbol universe construction and filtering.

use chrono::NaiveDate;
use serde::Serialize;

/// Registry row for one listed instrument.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub name: String,
    pub list_date: Option<NaiveDate>,
}

/// Drop every symbol the caller-supplied predicate excludes. The engine
/// never hard-codes an exclusion policy; callers pass one in (see
/// [`standard_exclusions`] for the conventional choice).
pub fn filter_universe<F>(symbols: Vec<SymbolInfo>, exclude: F) -> Vec<SymbolInfo>
where
    F: Fn(&SymbolInfo) -> bool,
{
    symbols.into_iter().filter(|s| !exclude(s)).collect()
}

/// The conventional A-share scan filter: special-treatment names ("ST",
/// "*ST"), Beijing-exchange codes (".BJ" suffix) and STAR-board codes
/// ("688" prefix) are excluded.
pub fn standard_exclusions(info: &SymbolInfo) -> bool {
    info.name.starts_with("ST")
        || info.name.starts_with("*ST")
        || info.symbol.ends_with(".BJ")
        || info.symbol.starts_with("688")
}
