// Std library crates
use std::collections::HashSet;

// External crates
use async_trait::async_trait;
use binance_sdk::config::ConfigurationRestApi;
use binance_sdk::spot::{
    SpotRestApi,
    rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
};
use binance_sdk::{errors, errors::ConnectorError as connection_error};

// Local crates
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::binance::{BINANCE, BinanceApiConfig};
use crate::data::CandleSource;
use crate::domain::{Candle, PairInterval};
use crate::error::MonitorError;
use crate::utils::TimeUtils;

// For "MS -> Enum" we return Result instead of panicking.
pub fn try_interval_from_ms(ms: i64) -> Result<KlinesIntervalEnum, String> {
    match ms {
        TimeUtils::MS_IN_S => Ok(KlinesIntervalEnum::Interval1s),
        TimeUtils::MS_IN_MIN => Ok(KlinesIntervalEnum::Interval1m),
        TimeUtils::MS_IN_3_MIN => Ok(KlinesIntervalEnum::Interval3m),
        TimeUtils::MS_IN_5_MIN => Ok(KlinesIntervalEnum::Interval5m),
        TimeUtils::MS_IN_15_MIN => Ok(KlinesIntervalEnum::Interval15m),
        TimeUtils::MS_IN_30_MIN => Ok(KlinesIntervalEnum::Interval30m),
        TimeUtils::MS_IN_H => Ok(KlinesIntervalEnum::Interval1h),
        TimeUtils::MS_IN_2_H => Ok(KlinesIntervalEnum::Interval2h),
        TimeUtils::MS_IN_4_H => Ok(KlinesIntervalEnum::Interval4h),
        TimeUtils::MS_IN_6_H => Ok(KlinesIntervalEnum::Interval6h),
        TimeUtils::MS_IN_8_H => Ok(KlinesIntervalEnum::Interval8h),
        TimeUtils::MS_IN_12_H => Ok(KlinesIntervalEnum::Interval12h),
        TimeUtils::MS_IN_D => Ok(KlinesIntervalEnum::Interval1d),
        TimeUtils::MS_IN_3_D => Ok(KlinesIntervalEnum::Interval3d),
        TimeUtils::MS_IN_W => Ok(KlinesIntervalEnum::Interval1w),
        TimeUtils::MS_IN_1_M => Ok(KlinesIntervalEnum::Interval1M),
        _ => Err(format!("Unsupported interval: {}ms", ms)),
    }
}

/*
Returns Some(f64) only if the input was the String variant of the enum and that string could be
successfully parsed. In all other cases (a different enum variant, or an invalid string) it returns None.
*/
fn kline_item_to_float(item: Option<KlinesItemInner>) -> Option<f64> {
    item.and_then(|inner| {
        if let KlinesItemInner::String(s) = inner {
            s.parse::<f64>().ok()
        } else {
            None
        }
    })
}

fn kline_item_to_int(item: Option<KlinesItemInner>) -> Option<i64> {
    match item {
        Some(KlinesItemInner::Integer(a)) => Some(a),
        _ => None,
    }
}

/// One Binance kline row: `[open_time, open, high, low, close, volume, close_time, ...]`.
/// Price and volume arrive as strings, timestamps as integers.
fn convert_kline_row(row: Vec<KlinesItemInner>) -> Result<Candle, String> {
    let mut items = row.into_iter();
    let open_time_ms = kline_item_to_int(items.next()).ok_or("open_time")?;
    let open_price = kline_item_to_float(items.next()).ok_or("open")?;
    let high_price = kline_item_to_float(items.next()).ok_or("high")?;
    let low_price = kline_item_to_float(items.next()).ok_or("low")?;
    let close_price = kline_item_to_float(items.next()).ok_or("close")?;
    // A candle without volume is still usable for pivots and zones
    let volume = kline_item_to_float(items.next()).unwrap_or(0.0);
    let close_time_ms = kline_item_to_int(items.next()).unwrap_or(open_time_ms);

    Ok(Candle {
        open_time_ms,
        open_price,
        high_price,
        low_price,
        close_price,
        volume,
        close_time_ms,
    })
}

fn convert_klines(
    data: Vec<Vec<KlinesItemInner>>,
    pair_interval: &PairInterval,
) -> Result<Vec<Candle>, MonitorError> {
    let candles = data
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            convert_kline_row(row).map_err(|field| {
                MonitorError::fetch(
                    pair_interval,
                    format!("kline {} has a missing or invalid {} field", i, field),
                )
            })
        })
        .collect::<Result<Vec<Candle>, MonitorError>>()?;

    if has_duplicate_open_time(&candles) {
        return Err(MonitorError::fetch(pair_interval, "duplicate kline open times"));
    }
    if !candles.windows(2).all(|w| w[0].open_time_ms < w[1].open_time_ms) {
        return Err(MonitorError::fetch(pair_interval, "klines are not in ascending order"));
    }
    Ok(candles)
}

fn has_duplicate_open_time(candles: &[Candle]) -> bool {
    // Checks whether open_time_ms is duplicated anywhere in the `candles` slice
    let mut seen_ids = HashSet::new();
    for candle in candles {
        if !seen_ids.insert(candle.open_time_ms) {
            // If `insert` returns `false` the element was already present
            return true;
        }
    }
    false
}

fn describe_connector_error(err: &anyhow::Error, pair_interval: &PairInterval) -> String {
    let Some(conn_err) = err.downcast_ref::<errors::ConnectorError>() else {
        log::error!("An unexpected error occurred for {}: {:#}", pair_interval, err);
        return format!("unexpected error: {}", err);
    };
    match conn_err {
        connection_error::ConnectorClientError(msg) => {
            log::error!("{} Client error: Check your request parameters. {}", pair_interval, msg);
        }
        connection_error::TooManyRequestsError(msg) => {
            log::error!("{} Rate limit exceeded. Will retry next tick. {}", pair_interval, msg);
        }
        connection_error::RateLimitBanError(msg) => {
            log::error!("{} IP address banned due to excessive rate limits. {}", pair_interval, msg);
        }
        errors::ConnectorError::ServerError { msg, status_code } => {
            log::error!(
                "{} Server error: {} (status code: {:?})",
                pair_interval,
                msg,
                status_code
            );
        }
        errors::ConnectorError::NetworkError(msg) => {
            log::error!("{} Network error: Check your internet connection. {}", pair_interval, msg);
        }
        errors::ConnectorError::NotFoundError(msg) => {
            log::error!("{} Resource not found. {}", pair_interval, msg);
        }
        connection_error::BadRequestError(msg) => {
            log::error!("{} Bad request: Verify your input parameters. {}", pair_interval, msg);
        }
        other => {
            log::error!("{} Unexpected ConnectionError variant: {:?}", pair_interval, other);
        }
    }
    conn_err.to_string()
}

/// Public spot klines endpoint. No API key is needed.
pub struct BinanceCandleSource {
    rest_client: RestApi,
}

impl BinanceCandleSource {
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = BinanceApiConfig::default();
        let rest_conf = ConfigurationRestApi::builder()
            .timeout(config.timeout_ms)
            .retries(config.retries)
            .backoff(config.backoff_ms)
            .build()?;
        // Create the Spot REST API client
        let rest_client = SpotRestApi::production(rest_conf);
        Ok(Self { rest_client })
    }
}

#[async_trait]
impl CandleSource for BinanceCandleSource {
    fn signature(&self) -> &'static str {
        "Binance API"
    }

    async fn fetch_candles(
        &self,
        pair_interval: &PairInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, MonitorError> {
        let interval = try_interval_from_ms(pair_interval.interval_ms)
            .map_err(|e| MonitorError::fetch(pair_interval, e))?;
        let limit = limit.min(BINANCE.limits.klines_limit_max) as i32;

        let params = KlinesParams::builder(pair_interval.bn_name().to_string(), interval)
            .limit(limit)
            .build()
            .map_err(|e| MonitorError::fetch(pair_interval, e.to_string()))?;

        let response = self
            .rest_client
            .klines(params)
            .await
            .map_err(|e| MonitorError::fetch(pair_interval, describe_connector_error(&e, pair_interval)))?;
        let rows = response
            .data()
            .await
            .map_err(|e| MonitorError::fetch(pair_interval, e.to_string()))?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_counts {
            log::info!("{} Number of klines in Binance data is: {}", pair_interval, rows.len());
        }

        convert_klines(rows, pair_interval)
    }
}
