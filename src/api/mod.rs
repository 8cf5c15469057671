pub mod dexscreener;
pub mod types;

pub use dexscreener::{DexClient, PairSource};
pub use types::RawPair;
