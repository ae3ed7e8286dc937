pub mod catalog;
pub mod config;
pub mod crypto;
pub mod storage;
pub mod utils;
