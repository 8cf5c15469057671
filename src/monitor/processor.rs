use serde::{Deserialize, Serialize};

use crate::api::RawPair;

/// Normalized subset of a pair record, the on-disk and console unit of the
/// bot. `pair_address` is the dedup key and is the only mandatory field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPair {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub pair_address: String,
    pub price_usd: Option<String>,
    pub liquidity_usd: Option<f64>,
    pub txns_5m: u64,
    pub created_at: Option<i64>,
}

/// Maps a raw batch to normalized records. Missing nested objects behave as
/// empty; a record without a pair address cannot be deduplicated or keyed and
/// is dropped with a warning, the rest of the batch still processes.
pub fn normalize_pairs(raw: &[RawPair]) -> Vec<NormalizedPair> {
    let mut processed = Vec::with_capacity(raw.len());

    for pair in raw {
        match normalize_pair(pair) {
            Some(normalized) => processed.push(normalized),
            None => {
                tracing::warn!(
                    "[Processor] Skipping pair without address (symbol: {})",
                    pair.display_symbol()
                );
            }
        }
    }

    processed
}

fn normalize_pair(pair: &RawPair) -> Option<NormalizedPair> {
    let pair_address = pair.pair_address.clone()?;

    let base_token = pair.base_token.as_ref();
    let m5 = pair.txns.as_ref().and_then(|t| t.m5.as_ref());
    let txns_5m = m5.and_then(|w| w.buys).unwrap_or(0) + m5.and_then(|w| w.sells).unwrap_or(0);

    Some(NormalizedPair {
        name: base_token.and_then(|t| t.name.clone()),
        symbol: base_token.and_then(|t| t.symbol.clone()),
        pair_address,
        price_usd: pair.price_usd.clone(),
        liquidity_usd: pair.liquidity.as_ref().and_then(|l| l.usd),
        txns_5m,
        created_at: pair.pair_created_at,
    })
}
