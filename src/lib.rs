//! 商品バリアント表エディタ（CLI）
//!
//! グリッドの状態機械は `variant-grid-common` にあり、
//! ここではそれを端末から操作する。

pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod replay;
pub mod table;
