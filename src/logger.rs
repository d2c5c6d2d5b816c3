//! 日志初始化
//!
//! 控制台输出，默认 info 级别，可用 RUST_LOG 覆盖。

use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// 初始化日志系统
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(layer().with_target(false))
        .init();
}

/// 测试用初始化（重复调用不报错）
#[allow(dead_code)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(false),
        )
        .try_init();
}
