//! 错误类型定义

/// 数据生成过程中的错误
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SeedError>;
