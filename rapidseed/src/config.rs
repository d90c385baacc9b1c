use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// 全局配置实例
static CONFIG: OnceLock<Config> = OnceLock::new();

/// 数据生成器配置结构
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 API 配置
    pub api: ApiConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 简单生成器的节奏配置
    pub simple: PacingConfig,
    /// 完整生成器的节奏配置
    pub working: PacingConfig,
}

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API 根地址，例如 http://localhost:5000/api
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// 所有测试用户共用的密码
    pub password: String,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志目录
    pub log_dir: PathBuf,
    /// 日志文件名前缀，为空时使用程序名
    pub file_prefix: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 是否同时写入日志文件
    pub file_output: bool,
}

/// 请求节奏配置，用于避开后端限流
///
/// 配置文件中出现的节奏段必须写全所有字段。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PacingConfig {
    /// 每个用户处理完后的等待（毫秒）
    pub user_delay_ms: u64,
    /// 每个商品请求后的等待（毫秒）
    pub product_delay_ms: u64,
    /// 收到 429 后的暂停（毫秒）
    pub rate_limit_pause_ms: u64,
    /// 用户阶段结束、商品阶段开始前的等待（毫秒）
    pub settle_delay_ms: u64,
    /// 同一用户因 429 重试的最大次数
    pub max_rate_limit_retries: u32,
}

impl Default for Config {
    /// 默认配置：两个生成器各自使用原始的节奏
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            simple: PacingConfig::simple(),
            working: PacingConfig::working(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 10,
            password: "password123".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            file_prefix: String::new(),
            level: "info".to_string(),
            file_output: true,
        }
    }
}

impl PacingConfig {
    /// 简单生成器：只在商品之间停 0.3 秒
    pub fn simple() -> Self {
        Self {
            user_delay_ms: 0,
            product_delay_ms: 300,
            rate_limit_pause_ms: 30_000,
            settle_delay_ms: 0,
            max_rate_limit_retries: 0,
        }
    }

    /// 完整生成器：用户间 3 秒，商品间 0.5 秒，阶段间 2 秒
    pub fn working() -> Self {
        Self {
            user_delay_ms: 3000,
            product_delay_ms: 500,
            rate_limit_pause_ms: 30_000,
            settle_delay_ms: 2000,
            max_rate_limit_retries: 3,
        }
    }

    /// 不做任何等待，测试时使用
    pub fn immediate() -> Self {
        Self {
            user_delay_ms: 0,
            product_delay_ms: 0,
            rate_limit_pause_ms: 0,
            settle_delay_ms: 0,
            max_rate_limit_retries: 3,
        }
    }

    pub fn user_delay(&self) -> Duration {
        Duration::from_millis(self.user_delay_ms)
    }

    pub fn product_delay(&self) -> Duration {
        Duration::from_millis(self.product_delay_ms)
    }

    pub fn rate_limit_pause(&self) -> Duration {
        Duration::from_millis(self.rate_limit_pause_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Config {
    /// 从配置文件加载配置，缺省的字段使用默认值
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证 API 配置
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Validation("API 地址不能为空".to_string()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "API 地址必须以 http:// 或 https:// 开头: {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }
        if self.api.password.is_empty() {
            return Err(ConfigError::Validation("用户密码不能为空".to_string()));
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
    #[error("配置未初始化，请先调用 init_config()")]
    NotInitialized,
}

/// 初始化全局配置
pub fn init_config() -> Result<(), ConfigError> {
    let config = load_config()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::Validation("配置已经初始化".to_string()))?;

    Ok(())
}

/// 获取全局配置实例
pub fn get_config() -> Result<&'static Config, ConfigError> {
    CONFIG.get().ok_or(ConfigError::NotInitialized)
}

/// 从文件或默认值加载配置
pub fn load_config() -> Result<Config, ConfigError> {
    let config_paths = ["config.toml", "./config/config.toml"];

    // 尝试从配置文件加载
    for path in &config_paths {
        if Path::new(path).exists() {
            println!("从配置文件加载: {}", path);
            return Config::load_from_file(path);
        }
    }

    // 如果没有找到配置文件，使用默认配置
    Ok(Config::default())
}
