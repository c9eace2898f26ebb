use crate::core::errors::BlockfactsError;
use crate::core::kernel::RestClient;
use crate::core::types::{ExchangeData, OhlcBar, Page, PairInfo, SortOrder, Trade};
use crate::rest::normalize_list;
use serde_json::Value;

/// Per-exchange data endpoint group.
pub struct ExchangeEndpoints<R: RestClient> {
    client: R,
}

impl<R: RestClient> ExchangeEndpoints<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Lists all exchanges that BlockFacts supports.
    pub async fn list_all_exchanges(&self) -> Result<Vec<ExchangeData>, BlockfactsError> {
        self.client.get_json("/api/v1/exchanges", &[]).await
    }

    /// Gets information about a specific exchange by name (e.g. KRAKEN):
    /// supported assets, asset ticker info, etc.
    pub async fn get_specific_exchange_data(
        &self,
        exchange: &str,
    ) -> Result<ExchangeData, BlockfactsError> {
        let endpoint = format!("/api/v1/exchanges/{}", exchange);
        self.client.get_json(&endpoint, &[]).await
    }

    /// Gets the pair-name mapping between an exchange's native pair string
    /// and the normalized BlockFacts pair.
    pub async fn get_pair_info(
        &self,
        exchange: &str,
        pair: &str,
    ) -> Result<PairInfo, BlockfactsError> {
        let params = [("exchange", exchange), ("pair", pair)];
        self.client.get_json("/api/v1/exchanges/pair-info", &params).await
    }

    /// Gets current trade data for specific asset-denominator pairs from
    /// specific exchanges.
    pub async fn get_current_trade_data(
        &self,
        assets: &str,
        denominators: &str,
        exchanges: &str,
    ) -> Result<Value, BlockfactsError> {
        let assets = normalize_list(assets);
        let denominators = normalize_list(denominators);
        let exchanges = normalize_list(exchanges);
        let params = [
            ("asset", assets.as_str()),
            ("denominator", denominators.as_str()),
            ("exchange", exchanges.as_str()),
        ];
        self.client.get("/api/v1/exchanges/trades", &params).await
    }

    /// Gets a snapshot of the last 600 trades for specific asset-denominator
    /// pairs from specific exchanges.
    pub async fn get_snapshot_trade_data(
        &self,
        assets: &str,
        denominators: &str,
        exchanges: &str,
    ) -> Result<Value, BlockfactsError> {
        let assets = normalize_list(assets);
        let denominators = normalize_list(denominators);
        let exchanges = normalize_list(exchanges);
        let params = [
            ("asset", assets.as_str()),
            ("denominator", denominators.as_str()),
            ("exchange", exchanges.as_str()),
        ];
        self.client
            .get("/api/v1/exchanges/trades/snapshot", &params)
            .await
    }

    /// Gets historical OHLCV bars built from exchange trades, by bar
    /// interval and date window.
    pub async fn get_ohlcv_trade_data(
        &self,
        asset: &str,
        denominator: &str,
        exchanges: &str,
        interval: &str,
        date_start: &str,
        date_end: &str,
        page: Option<u32>,
    ) -> Result<Value, BlockfactsError> {
        let exchanges = normalize_list(exchanges);
        let page = page.unwrap_or(1).to_string();
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("exchange", exchanges.as_str()),
            ("interval", interval),
            ("dateStart", date_start),
            ("dateEnd", date_end),
            ("page", page.as_str()),
        ];
        self.client
            .get("/api/v1/exchanges/trades/ohlcv", &params)
            .await
    }

    /// Gets historical exchange trades by asset-denominator, exchanges,
    /// date, time and interval window in minutes.
    pub async fn get_historical_trade_data(
        &self,
        asset: &str,
        denominator: &str,
        exchanges: &str,
        date: &str,
        time: &str,
        interval: u32,
        page: Option<u32>,
    ) -> Result<Page<Trade>, BlockfactsError> {
        let exchanges = normalize_list(exchanges);
        let interval = interval.to_string();
        let page = page.unwrap_or(1).to_string();
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("exchange", exchanges.as_str()),
            ("date", date),
            ("time", time),
            ("interval", interval.as_str()),
            ("page", page.as_str()),
        ];
        self.client
            .get_json("/api/v1/exchanges/trades/historical", &params)
            .await
    }

    /// Gets exchange trades executed in a specific second.
    pub async fn get_specific_trade_data(
        &self,
        asset: &str,
        denominator: &str,
        exchanges: &str,
        date: &str,
        time: &str,
    ) -> Result<Vec<Trade>, BlockfactsError> {
        let exchanges = normalize_list(exchanges);
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("exchange", exchanges.as_str()),
            ("date", date),
            ("time", time),
        ];
        self.client
            .get_json("/api/v1/exchanges/trades/specific", &params)
            .await
    }

    /// Gets total traded volume on all exchanges over a named lookback
    /// interval (e.g. oneDay, sevenDay).
    pub async fn get_total_trade_volume(
        &self,
        asset: &str,
        denominator: &str,
        interval: &str,
    ) -> Result<Value, BlockfactsError> {
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("interval", interval),
        ];
        self.client
            .get("/api/v1/exchanges/trades/totalVolume", &params)
            .await
    }

    /// Gets ranked period movers on one exchange over a named lookback
    /// interval.
    pub async fn get_period_movers(
        &self,
        exchange: &str,
        denominator: &str,
        date: &str,
        interval: &str,
        sort: SortOrder,
    ) -> Result<Value, BlockfactsError> {
        let params = [
            ("exchange", exchange),
            ("denominator", denominator),
            ("date", date),
            ("interval", interval),
            ("sort", sort.as_query()),
        ];
        self.client
            .get("/api/v1/exchanges/period-movers", &params)
            .await
    }

    /// Gets exchange end-of-day bars, going `length` days back from the
    /// current day.
    pub async fn get_end_of_day_data(
        &self,
        asset: &str,
        denominator: &str,
        exchange: &str,
        length: u32,
    ) -> Result<Vec<OhlcBar>, BlockfactsError> {
        let length = length.to_string();
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("exchange", exchange),
            ("length", length.as_str()),
        ];
        self.client
            .get_json("/api/v1/exchanges/trades/endOfDay", &params)
            .await
    }
}
