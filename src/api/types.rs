use serde::{Deserialize, Serialize};

/// A pair object as returned by the DexScreener `pairs` endpoint. Every field
/// is optional: the upstream feed omits sub-objects freely and absence is not
/// an error anywhere downstream. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPair {
    pub pair_address: Option<String>,
    pub base_token: Option<BaseToken>,
    pub price_usd: Option<String>,
    pub liquidity: Option<Liquidity>,
    pub txns: Option<TxnWindows>,
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseToken {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    pub usd: Option<f64>,
}

/// Transaction counts bucketed by trailing window; only the 5-minute window
/// is consumed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnWindows {
    pub m5: Option<TxnCounts>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnCounts {
    pub buys: Option<u64>,
    pub sells: Option<u64>,
}

impl RawPair {
    pub fn display_symbol(&self) -> &str {
        self.base_token
            .as_ref()
            .and_then(|t| t.symbol.as_deref())
            .unwrap_or("?")
    }
}
