//! Logging 日志模块
//!
//! 提供 QuantRisk 的默认 Tracing 日志初始化器。库本身只通过 `tracing` 宏输出事件，
//! 是否以及如何订阅由调用方决定。

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 默认日志级别，在未设置 `RUST_LOG` 环境变量时使用。
const DEFAULT_DIRECTIVE: tracing::Level = tracing::Level::INFO;

/// 初始化默认的人类可读格式 Tracing 日志。
///
/// 日志级别由 `RUST_LOG` 环境变量控制，默认 `INFO`。
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init()
}

/// 初始化 JSON 格式的 Tracing 日志。
///
/// 日志级别由 `RUST_LOG` 环境变量控制，默认 `INFO`。
pub fn init_json_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .init()
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(DEFAULT_DIRECTIVE.into())
        .from_env_lossy()
}
