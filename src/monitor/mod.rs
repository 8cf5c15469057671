pub mod dedup;
pub mod detector;
pub mod processor;
pub mod storage;

pub use detector::{CycleReport, PairMonitor};
pub use processor::NormalizedPair;
pub use storage::{JsonLog, StorageError};
