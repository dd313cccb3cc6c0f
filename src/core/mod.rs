pub mod config;
pub mod logging;
pub mod storage;
pub mod utils;
