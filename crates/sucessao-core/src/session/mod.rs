pub mod rate_sync;
pub mod replay;
