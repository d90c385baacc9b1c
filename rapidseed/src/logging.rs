use anyhow::Result;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 控制台时间格式，与 `[HH:MM:SS] message` 的输出保持一致
const CONSOLE_TIME_FORMAT: &str = "[%H:%M:%S]";

fn console_timer() -> ChronoLocal {
    ChronoLocal::new(CONSOLE_TIME_FORMAT.to_string())
}

/// 初始化日志系统
///
/// 这个函数会：
/// 1. 按配置的级别过滤日志
/// 2. 输出到控制台（带颜色、带时间）
/// 3. 开启文件输出时，按日期分割写入 `log_dir`
///
/// 文件输出开启时返回 `WorkerGuard`，调用方需要持有它直到程序结束，
/// 否则缓冲中的日志不会落盘。
///
/// # 示例
/// ```rust,no_run
/// use rapidseed::config::LoggingConfig;
/// use rapidseed::logging::init_logging;
///
/// let _guard = init_logging(&LoggingConfig::default(), "working_data_generator")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LoggingConfig, app_name: &str) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)?;

    let (file_layer, guard) = if config.file_output {
        // 创建日志目录
        std::fs::create_dir_all(&config.log_dir)?;

        let prefix = if config.file_prefix.is_empty() {
            app_name
        } else {
            config.file_prefix.as_str()
        };

        // 创建文件日志 appender（按日期分割）
        let file_appender = rolling::daily(&config.log_dir, prefix);
        let (writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false) // 文件中不使用颜色
            .with_target(false);

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(
            // 控制台日志层
            fmt::layer()
                .with_writer(io::stdout)
                .with_ansi(true)
                .with_target(false)
                .with_level(false)
                .with_timer(console_timer()),
        )
        .try_init()?;

    Ok(guard)
}
