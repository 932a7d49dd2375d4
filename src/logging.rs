// ==========================================
// UV DLP 切片配置 - 日志系统
// ==========================================
// 输出: stderr（stdout 留给参数摘要 / JSON 快照）
// 环境变量:
// - RUST_LOG: 日志级别过滤器（默认: info）
// - UVDLP_LOG_FORMAT: text（默认）或 json
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json, // 供上位机/采集程序逐行解析
}

impl LogFormat {
    /// 解析 UVDLP_LOG_FORMAT 的取值，无法识别时回退为 Text
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var("UVDLP_LOG_FORMAT").ok().as_deref())
    }
}

/// 初始化日志系统
///
/// # 示例
/// ```no_run
/// use uvdlp_slice_config::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match LogFormat::from_env() {
        LogFormat::Json => builder.json().with_current_span(false).init(),
        LogFormat::Text => builder.with_line_number(true).init(),
    }
}

/// 初始化测试环境的日志系统（可重复调用）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("uvdlp_slice_config=debug"))
        .with_test_writer()
        .try_init();
}
