use async_trait::async_trait;
use blockfacts::core::errors::BlockfactsError;
use blockfacts::core::kernel::RestClient;
use blockfacts::core::types::SortOrder;
use blockfacts::rest::{AssetEndpoints, ExchangeEndpoints, NormalizationEndpoints};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Records every request and answers with a canned JSON body.
#[derive(Clone)]
struct RecordingRest {
    calls: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
    response: Value,
}

impl RecordingRest {
    fn returning(response: Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    fn last_call(&self) -> (String, Vec<(String, String)>) {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was recorded")
    }

    fn record(&self, endpoint: &str, query_params: &[(&str, &str)]) {
        let params = query_params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), params));
    }
}

#[async_trait]
impl RestClient for RecordingRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Value, BlockfactsError> {
        self.record(endpoint, query_params);
        Ok(self.response.clone())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, BlockfactsError> {
        self.record(endpoint, query_params);
        serde_json::from_value(self.response.clone()).map_err(|e| {
            BlockfactsError::DeserializationError(format!("Failed to deserialize JSON: {}", e))
        })
    }
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> &'a str {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing query parameter '{}'", key))
}

#[tokio::test]
async fn asset_endpoints_hit_the_documented_paths() {
    let rest = RecordingRest::returning(json!({"ticker": "BTC", "name": "Bitcoin", "active": true}));
    let assets = AssetEndpoints::new(rest.clone());

    let asset = assets.get_specific_asset("BTC").await.unwrap();
    assert_eq!(asset.ticker, "BTC");
    assert_eq!(asset.name, "Bitcoin");
    assert!(asset.active);

    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/assets/BTC");
    assert!(params.is_empty());

    let list_rest = RecordingRest::returning(json!([{"ticker": "ETH"}]));
    let assets = AssetEndpoints::new(list_rest.clone());
    let all = assets.list_all_assets().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(list_rest.last_call().0, "/api/v1/assets");
}

#[tokio::test]
async fn current_data_strips_whitespace_from_list_parameters() {
    let rest = RecordingRest::returning(json!({}));
    let normalization = NormalizationEndpoints::new(rest.clone());

    normalization
        .get_current_data("BTC, ETH", " USD, EUR ")
        .await
        .unwrap();

    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/blockfacts/price");
    assert_eq!(param(&params, "asset"), "BTC,ETH");
    assert_eq!(param(&params, "denominator"), "USD,EUR");
}

#[tokio::test]
async fn whitelist_path_embeds_normalized_pairs() {
    let rest = RecordingRest::returning(json!({}));
    let normalization = NormalizationEndpoints::new(rest.clone());

    normalization
        .get_exchanges_in_normalization("BTC-USD, BTC-EUR")
        .await
        .unwrap();

    let (endpoint, _) = rest.last_call();
    assert_eq!(
        endpoint,
        "/api/v1/blockfacts/normalization/whitelist/BTC-USD,BTC-EUR"
    );
}

#[tokio::test]
async fn historical_data_defaults_to_page_one() {
    let rest = RecordingRest::returning(json!({"page": 1, "totalPages": 1, "results": []}));
    let normalization = NormalizationEndpoints::new(rest.clone());

    normalization
        .get_historical_data("BTC", "USD", "2.9.2019", "14:01:00", 20, None)
        .await
        .unwrap();

    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/blockfacts/price/historical");
    assert_eq!(param(&params, "asset"), "BTC");
    assert_eq!(param(&params, "denominator"), "USD");
    assert_eq!(param(&params, "date"), "2.9.2019");
    assert_eq!(param(&params, "time"), "14:01:00");
    assert_eq!(param(&params, "interval"), "20");
    assert_eq!(param(&params, "page"), "1");

    normalization
        .get_historical_data("BTC", "USD", "2.9.2019", "14:01:00", 20, Some(4))
        .await
        .unwrap();
    assert_eq!(param(&rest.last_call().1, "page"), "4");
}

#[tokio::test]
async fn specific_historical_data_deserializes_into_normalization() {
    let rest = RecordingRest::returning(json!({
        "exchange": "BLOCKFACTS",
        "pair": "BTC-USD",
        "price": 9123.5,
        "included": [],
        "excluded": [],
        "timestamp": 1568639909000_i64,
        "normalizationTimestamp": 1568639909521_i64,
        "algorithm": "exchange-weighted-median"
    }));
    let normalization = NormalizationEndpoints::new(rest.clone());

    let point = normalization
        .get_specific_historical_data("BTC", "USD", "2.9.2019", "14:00:00")
        .await
        .unwrap();

    assert_eq!(point.pair, "BTC-USD");
    assert_eq!(point.algorithm, "exchange-weighted-median");
    assert_eq!(rest.last_call().0, "/api/v1/blockfacts/price/specific");
}

#[tokio::test]
async fn end_of_day_endpoints_carry_length() {
    let rest = RecordingRest::returning(json!([]));
    let normalization = NormalizationEndpoints::new(rest.clone());
    normalization
        .get_end_of_day_data("BTC", "USD", 20)
        .await
        .unwrap();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/blockfacts/price/endOfDay");
    assert_eq!(param(&params, "length"), "20");

    let rest = RecordingRest::returning(json!([]));
    let exchanges = ExchangeEndpoints::new(rest.clone());
    exchanges
        .get_end_of_day_data("BTC", "USD", "KRAKEN", 7)
        .await
        .unwrap();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/trades/endOfDay");
    assert_eq!(param(&params, "exchange"), "KRAKEN");
    assert_eq!(param(&params, "length"), "7");
}

#[tokio::test]
async fn period_movers_sort_flag_maps_to_wire_values() {
    let rest = RecordingRest::returning(json!([]));
    let normalization = NormalizationEndpoints::new(rest.clone());

    normalization
        .get_period_movers("USD", "2.9.2019", "sevenDay", SortOrder::Descending)
        .await
        .unwrap();
    assert_eq!(param(&rest.last_call().1, "sort"), "-1");

    normalization
        .get_period_movers("USD", "2.9.2019", "sevenDay", SortOrder::Ascending)
        .await
        .unwrap();
    assert_eq!(param(&rest.last_call().1, "sort"), "1");
}

#[tokio::test]
async fn exchange_trade_endpoints_normalize_exchange_lists() {
    let rest = RecordingRest::returning(json!({}));
    let exchanges = ExchangeEndpoints::new(rest.clone());

    exchanges
        .get_current_trade_data("BTC", "USD", "KRAKEN, COINBASE")
        .await
        .unwrap();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/trades");
    assert_eq!(param(&params, "exchange"), "KRAKEN,COINBASE");

    exchanges
        .get_specific_trade_data("BTC", "USD", "KRAKEN, COINBASE", "2.9.2019", "14:00:00")
        .await
        .ok();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/trades/specific");
    assert_eq!(param(&params, "exchange"), "KRAKEN,COINBASE");
    assert_eq!(param(&params, "time"), "14:00:00");
}

#[tokio::test]
async fn historical_trade_data_returns_a_typed_page() {
    let rest = RecordingRest::returning(json!({
        "page": 2,
        "totalPages": 5,
        "results": [{"exchange": "KRAKEN", "pair": "BTC-USD", "price": 9000.0, "tradeId": "t-9"}]
    }));
    let exchanges = ExchangeEndpoints::new(rest.clone());

    let page = exchanges
        .get_historical_trade_data("BTC", "USD", "KRAKEN", "2.9.2019", "14:00:00", 60, Some(2))
        .await
        .unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.results[0].trade_id, "t-9");
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/trades/historical");
    assert_eq!(param(&params, "interval"), "60");
    assert_eq!(param(&params, "page"), "2");
}

#[tokio::test]
async fn pair_info_and_volume_endpoints() {
    let rest = RecordingRest::returning(json!({
        "collection": "KRAKEN",
        "query": "XBTUSD",
        "tickerId": "BTC",
        "blockfactsPair": "BTC-USD",
        "assetName": "Bitcoin",
        "active": true,
        "type": "crypto",
        "denominatorName": "US Dollar",
        "blockfactsDenominator": "USD"
    }));
    let exchanges = ExchangeEndpoints::new(rest.clone());

    let pair_info = exchanges.get_pair_info("KRAKEN", "XBTUSD").await.unwrap();
    assert_eq!(pair_info.blockfacts_pair, "BTC-USD");
    assert_eq!(pair_info.pair_type, "crypto");
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/pair-info");
    assert_eq!(param(&params, "pair"), "XBTUSD");

    let rest = RecordingRest::returning(json!({}));
    let exchanges = ExchangeEndpoints::new(rest.clone());
    exchanges
        .get_total_trade_volume("BTC", "USD", "sevenDay")
        .await
        .unwrap();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/trades/totalVolume");
    assert_eq!(param(&params, "interval"), "sevenDay");
}

#[tokio::test]
async fn snapshot_endpoints_normalize_every_list_parameter() {
    let rest = RecordingRest::returning(json!({}));
    let normalization = NormalizationEndpoints::new(rest.clone());

    normalization
        .get_ohlcv_snapshot_data("BTC, ETH", "USD", "1m, 1h")
        .await
        .unwrap();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/blockfacts/price/snapshot/ohlcv");
    assert_eq!(param(&params, "asset"), "BTC,ETH");
    assert_eq!(param(&params, "interval"), "1m,1h");

    let rest = RecordingRest::returning(json!({}));
    let exchanges = ExchangeEndpoints::new(rest.clone());
    exchanges
        .get_snapshot_trade_data("BTC", "USD, EUR", "KRAKEN, COINBASE")
        .await
        .unwrap();
    let (endpoint, params) = rest.last_call();
    assert_eq!(endpoint, "/api/v1/exchanges/trades/snapshot");
    assert_eq!(param(&params, "denominator"), "USD,EUR");
    assert_eq!(param(&params, "exchange"), "KRAKEN,COINBASE");
}

#[tokio::test]
async fn concurrent_requests_share_one_client() {
    let rest = RecordingRest::returning(
        json!([{"ticker": "BTC", "name": "Bitcoin", "active": true}]),
    );

    let requests = (0..5).map(|i| {
        let assets = AssetEndpoints::new(rest.clone());
        async move {
            let result = assets.list_all_assets().await;
            (i, result)
        }
    });

    let results = futures::future::join_all(requests).await;

    for (i, result) in results {
        let assets = result.unwrap_or_else(|e| panic!("request {} failed: {}", i, e));
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].ticker, "BTC");
    }

    let calls = rest.calls.lock().unwrap();
    assert_eq!(calls.len(), 5);
    assert!(calls.iter().all(|(endpoint, _)| endpoint == "/api/v1/assets"));
}
