use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A supported crypto asset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Asset {
    pub ticker: String,
    pub name: String,
    pub active: bool,
}

/// A supported source exchange together with its listed assets.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExchangeData {
    pub name: String,
    pub assets: Vec<ExchangeAsset>,
}

/// One asset listing on an exchange, with its native and normalized pair
/// identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExchangeAsset {
    pub ticker: String,
    pub pair: String,
    pub blockfacts_pair: String,
    pub active: bool,
}

/// Pair-name mapping between an exchange's native pair string and the
/// normalized BlockFacts pair.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PairInfo {
    pub collection: String,
    pub query: String,
    pub ticker_id: String,
    pub blockfacts_pair: String,
    pub asset_name: String,
    pub active: bool,
    #[serde(rename = "type")]
    pub pair_type: String,
    pub denominator_name: String,
    pub blockfacts_denominator: String,
}

/// One executed trade on an exchange.
///
/// `exchange_time` is the exchange-reported wall-clock string;
/// `blockfacts_time` is the platform-recorded epoch millisecond timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Trade {
    pub exchange: String,
    pub pair: String,
    pub price: f64,
    pub trade_size: f64,
    pub denominator_size: f64,
    pub maker_taker: String,
    pub trade_id: String,
    pub exchange_time: String,
    pub blockfacts_time: i64,
    pub epoch_exchange_time: i64,
}

/// One computed cross-exchange normalized price point, with the trades that
/// went into (and were filtered out of) the computation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Normalization {
    pub exchange: String,
    pub pair: String,
    pub price: f64,
    pub included: Vec<Trade>,
    pub excluded: Vec<Trade>,
    pub timestamp: i64,
    pub normalization_timestamp: i64,
    pub algorithm: String,
}

/// One aggregated OHLCV price bar.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct OhlcBar {
    pub exchange: String,
    pub pair: String,
    pub volume: f64,
    pub base_volume: f64,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub trades_count: i64,
    pub timestamp: i64,
    pub date: Option<DateTime<Utc>>,
}

/// One asset-denominator pair currently being normalized, with the
/// exchanges feeding it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RunningNormalizationPair {
    pub asset: String,
    pub blockfacts_pair: String,
    pub blockfacts_ticker: String,
    pub blockfacts_denominator: String,
    pub exchanges: Vec<String>,
}

/// One page of a paginated list endpoint. The server pages at 100 results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<T>,
}

/// Sort direction for period-mover rankings.
///
/// Ascending ranks losers first, descending ranks winners first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Query-string value the server expects.
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Ascending => "1",
            Self::Descending => "-1",
        }
    }
}
