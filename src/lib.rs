//! passport-wall: デジタル製品パスポートのCLI
//!
//! 永続化面はJSONファイル、表示は端末テキストと静的HTML出力。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod file_storage;
pub mod logging;
pub mod output;
