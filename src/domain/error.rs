//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for quantscan.
#[derive(Debug, thiserror::Error)]
pub enum QuantscanError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("non-monotonic trade dates for {symbol} at {date}")]
    NonMonotonicDates { symbol: String, date: NaiveDate },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&QuantscanError> for std::process::ExitCode {
    fn from(err: &QuantscanError) -> Self {
        let code: u8 = match err {
            QuantscanError::Io(_) | QuantscanError::Report { .. } => 1,
            QuantscanError::ConfigParse { .. }
            | QuantscanError::ConfigMissing { .. }
            | QuantscanError::ConfigInvalid { .. } => 2,
            QuantscanError::Database { .. } | QuantscanError::DatabaseQuery { .. } => 3,
            QuantscanError::NoData { .. } | QuantscanError::NonMonotonicDates { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_symbol() {
        let err = QuantscanError::NonMonotonicDates {
            symbol: "600519.SH".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("600519.SH"));
        assert!(msg.contains("2024-05-06"));
    }

    #[test]
    fn config_missing_display() {
        let err = QuantscanError::ConfigMissing {
            section: "backtest".into(),
            key: "workers".into(),
        };
        assert_eq!(err.to_string(), "missing config key [backtest] workers");
    }
}
