//! cotacao-rust
//!
//! 価格表（PDF解析済み）をキーワードで検索し、見積用の価格を表示するCLI。
//! 照合・価格導出は cotacao-common、ここでは設定・保存・取り込み・表示を扱う。

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod importer;
pub mod logging;
pub mod store;
