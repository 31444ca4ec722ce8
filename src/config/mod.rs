//! 应用配置
//!
//! 配置来源按优先级从低到高：`config.toml`、`config.{APP_ENV}.toml`、
//! `LEARNHUB_*` 环境变量、常用环境变量覆盖（见 `AppConfig::load`）。

mod r#impl;
mod structs;

pub use structs::*;
