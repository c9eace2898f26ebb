use crate::core::errors::BlockfactsError;
use crate::core::kernel::RestClient;
use crate::core::types::{Normalization, OhlcBar, Page, RunningNormalizationPair, SortOrder};
use crate::rest::normalize_list;
use serde_json::Value;

/// Normalized-price ("blockfacts") endpoint group.
///
/// Historical endpoints are paginated at 100 results per page; `page`
/// defaults to 1 when not given. The `interval` window parameter covers 0
/// to 240 minutes and the end-of-day `length` 0 to 20 days back; bounds are
/// enforced by the server, not here.
pub struct NormalizationEndpoints<R: RestClient> {
    client: R,
}

impl<R: RestClient> NormalizationEndpoints<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Lists all exchanges that go into the normalization for specific
    /// asset-denominator pairs (e.g. BTC-USD, BTC-EUR).
    pub async fn get_exchanges_in_normalization(
        &self,
        pairs: &str,
    ) -> Result<Value, BlockfactsError> {
        let endpoint = format!(
            "/api/v1/blockfacts/normalization/whitelist/{}",
            normalize_list(pairs)
        );
        self.client.get(&endpoint, &[]).await
    }

    /// Gets current normalization data for specific asset-denominator pairs.
    pub async fn get_current_data(
        &self,
        assets: &str,
        denominators: &str,
    ) -> Result<Value, BlockfactsError> {
        let assets = normalize_list(assets);
        let denominators = normalize_list(denominators);
        let params = [
            ("asset", assets.as_str()),
            ("denominator", denominators.as_str()),
        ];
        self.client.get("/api/v1/blockfacts/price", &params).await
    }

    /// Gets a snapshot of the last 600 seconds of normalized prices for
    /// specific asset-denominator pairs.
    pub async fn get_snapshot_data(
        &self,
        assets: &str,
        denominators: &str,
    ) -> Result<Value, BlockfactsError> {
        let assets = normalize_list(assets);
        let denominators = normalize_list(denominators);
        let params = [
            ("asset", assets.as_str()),
            ("denominator", denominators.as_str()),
        ];
        self.client
            .get("/api/v1/blockfacts/price/snapshot", &params)
            .await
    }

    /// Gets a snapshot of OHLCV bars for the given intervals (e.g. 1m, 1h).
    pub async fn get_ohlcv_snapshot_data(
        &self,
        assets: &str,
        denominators: &str,
        intervals: &str,
    ) -> Result<Value, BlockfactsError> {
        let assets = normalize_list(assets);
        let denominators = normalize_list(denominators);
        let intervals = normalize_list(intervals);
        let params = [
            ("asset", assets.as_str()),
            ("denominator", denominators.as_str()),
            ("interval", intervals.as_str()),
        ];
        self.client
            .get("/api/v1/blockfacts/price/snapshot/ohlcv", &params)
            .await
    }

    /// Gets historical normalization data by asset-denominator, date, time
    /// and interval window in minutes (e.g. 20 = 14:01:00 - 14:21:00).
    pub async fn get_historical_data(
        &self,
        asset: &str,
        denominator: &str,
        date: &str,
        time: &str,
        interval: u32,
        page: Option<u32>,
    ) -> Result<Page<Normalization>, BlockfactsError> {
        let interval = interval.to_string();
        let page = page.unwrap_or(1).to_string();
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("date", date),
            ("time", time),
            ("interval", interval.as_str()),
            ("page", page.as_str()),
        ];
        self.client
            .get_json("/api/v1/blockfacts/price/historical", &params)
            .await
    }

    /// Gets historical OHLCV bars by asset-denominator, bar interval and
    /// date window.
    pub async fn get_ohlcv_data(
        &self,
        asset: &str,
        denominator: &str,
        interval: &str,
        date_start: &str,
        date_end: &str,
        page: Option<u32>,
    ) -> Result<Value, BlockfactsError> {
        let page = page.unwrap_or(1).to_string();
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("interval", interval),
            ("dateStart", date_start),
            ("dateEnd", date_end),
            ("page", page.as_str()),
        ];
        self.client
            .get("/api/v1/blockfacts/price/ohlcv", &params)
            .await
    }

    /// Gets the historical normalized price at a specific point in time.
    pub async fn get_specific_historical_data(
        &self,
        asset: &str,
        denominator: &str,
        date: &str,
        time: &str,
    ) -> Result<Normalization, BlockfactsError> {
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("date", date),
            ("time", time),
        ];
        self.client
            .get_json("/api/v1/blockfacts/price/specific", &params)
            .await
    }

    /// Gets all running normalization pairs.
    pub async fn get_normalization_pairs(
        &self,
    ) -> Result<Vec<RunningNormalizationPair>, BlockfactsError> {
        self.client
            .get_json("/api/v1/blockfacts/normalization/trades", &[])
            .await
    }

    /// Gets normalized end-of-day bars, going `length` days back from the
    /// current day.
    pub async fn get_end_of_day_data(
        &self,
        asset: &str,
        denominator: &str,
        length: u32,
    ) -> Result<Vec<OhlcBar>, BlockfactsError> {
        let length = length.to_string();
        let params = [
            ("asset", asset),
            ("denominator", denominator),
            ("length", length.as_str()),
        ];
        self.client
            .get_json("/api/v1/blockfacts/price/endOfDay", &params)
            .await
    }

    /// Gets ranked period movers for a denominator over a named lookback
    /// interval (e.g. sevenDay).
    pub async fn get_period_movers(
        &self,
        denominator: &str,
        date: &str,
        interval: &str,
        sort: SortOrder,
    ) -> Result<Value, BlockfactsError> {
        let params = [
            ("denominator", denominator),
            ("date", date),
            ("interval", interval),
            ("sort", sort.as_query()),
        ];
        self.client
            .get("/api/v1/blockfacts/period-movers", &params)
            .await
    }
}
