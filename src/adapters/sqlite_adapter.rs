//! SQLite data adapter.
//!
//! Pooled connections so the orchestrator's worker threads fetch
//! concurrently without sharing a handle.

use crate::domain::bar::PriceBar;
use crate::domain::error::QuantscanError;
use crate::domain::universe::SymbolInfo;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, QuantscanError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| QuantscanError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 8) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool =
            Pool::builder()
                .max_size(pool_size)
                .build(manager)
                .map_err(|e: r2d2::Error| QuantscanError::Database {
                    reason: e.to_string(),
                })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, QuantscanError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn initialize_schema(&self) -> Result<(), QuantscanError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS daily_bar (
                symbol TEXT NOT NULL,
                trade_date TEXT NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                pre_close REAL NOT NULL,
                pct_chg REAL NOT NULL,
                vol REAL NOT NULL,
                amount REAL NOT NULL,
                PRIMARY KEY (symbol, trade_date)
            );
            CREATE INDEX IF NOT EXISTS idx_daily_bar_symbol ON daily_bar(symbol);
            CREATE TABLE IF NOT EXISTS instrument (
                symbol TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                list_date TEXT
            );",
        )
        .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    pub fn insert_bars(&self, symbol: &str, bars: &[PriceBar]) -> Result<(), QuantscanError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        let tx =
            conn.transaction()
                .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        for bar in bars {
            tx.execute(
                "INSERT OR REPLACE INTO daily_bar
                 (symbol, trade_date, open, high, low, close, pre_close, pct_chg, vol, amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    symbol,
                    bar.trade_date.format("%Y-%m-%d").to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.pre_close,
                    bar.pct_chg,
                    bar.vol,
                    bar.amount
                ],
            )
            .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                reason: e.to_string(),
            })?;
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        Ok(())
    }

    pub fn insert_instrument(&self, info: &SymbolInfo) -> Result<(), QuantscanError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        conn.execute(
            "INSERT OR REPLACE INTO instrument (symbol, name, list_date) VALUES (?1, ?2, ?3)",
            params![
                info.symbol,
                info.name,
                info.list_date.map(|d| d.format("%Y-%m-%d").to_string())
            ],
        )
        .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            date_str.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

impl DataPort for SqliteAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<PriceBar>, QuantscanError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        let query = "SELECT trade_date, open, high, low, close, pre_close, pct_chg, vol, amount
                     FROM daily_bar
                     WHERE symbol = ?1
                     ORDER BY trade_date ASC";

        let mut stmt =
            conn.prepare(query)
                .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        let rows = stmt
            .query_map(params![symbol], |row| {
                let date_str: String = row.get(0)?;
                Ok(PriceBar {
                    trade_date: parse_date(&date_str)?,
                    open: row.get(1)?,
                    high: row.get(2)?,
                    low: row.get(3)?,
                    close: row.get(4)?,
                    pre_close: row.get(5)?,
                    pct_chg: row.get(6)?,
                    vol: row.get(7)?,
                    amount: row.get(8)?,
                })
            })
            .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut bars = Vec::new();
        for row in rows {
            bars.push(
                row.map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<SymbolInfo>, QuantscanError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        let query = "SELECT symbol, name, list_date FROM instrument ORDER BY symbol";

        let mut stmt =
            conn.prepare(query)
                .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        let rows = stmt
            .query_map([], |row| {
                let list_date: Option<String> = row.get(2)?;
                let list_date = match list_date {
                    Some(s) => Some(parse_date(&s)?),
                    None => None,
                };
                Ok(SymbolInfo {
                    symbol: row.get(0)?,
                    name: row.get(1)?,
                    list_date,
                })
            })
            .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut symbols = Vec::new();
        for row in rows {
            symbols.push(
                row.map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantscanError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| QuantscanError::Database {
                reason: e.to_string(),
            })?;

        let query =
            "SELECT MIN(trade_date), MAX(trade_date), COUNT(*) FROM daily_bar WHERE symbol = ?1";

        let result: (Option<String>, Option<String>, i64) = conn
            .query_row(query, params![symbol], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(|e: rusqlite::Error| QuantscanError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        match result {
            (Some(min_str), Some(max_str), count) if count > 0 => {
                let min = NaiveDate::parse_from_str(&min_str, "%Y-%m-%d").map_err(
                    |e: chrono::ParseError| QuantscanError::Database {
                        reason: e.to_string(),
                    },
                )?;
                let max = NaiveDate::parse_from_str(&max_str, "%Y-%m-%d").map_err(
                    |e: chrono::ParseError| QuantscanError::Database {
                        reason: e.to_string(),
                    },
                )?;
                Ok(Some((min, max, count as usize)))
            }
            _ => Ok(None),
        }
    }
}
