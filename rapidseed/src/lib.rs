//! # Rapid Sort 测试数据生成
//!
//! 通过后端 HTTP API 为库存管理系统填充测试用户和商品：
//! - 健康检查后端
//! - 登录或注册固定的测试用户，收集 Bearer 令牌
//! - 使用这些令牌创建商品目录
//! - 打印汇总与登录凭据
//!
//! 所有请求按顺序发出，请求之间按配置停顿以避开限流。

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod products;
pub mod runner;
pub mod tokens;
pub mod users;

pub use catalog::Variant;
pub use client::{ApiResponse, BackendClient};
pub use config::{get_config, init_config, Config, ConfigError, PacingConfig};
pub use error::{Result, SeedError};
pub use runner::{DataGenerator, RunOutcome, RunSummary};
pub use tokens::TokenBook;
