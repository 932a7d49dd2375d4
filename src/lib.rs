// ==========================================
// UV DLP 切片配置 - 核心库
// ==========================================
// 系统定位: 切片/构建参数的保存、恢复与 G 代码片段管理
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 类型
pub mod domain;

// 配置层 - 切片参数与片段
pub mod config;

// 机器配置读取接口
pub mod machine;

// 日志系统
pub mod logging;

// 应用层 - 配置档定位
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::ProfileLocation;
pub use config::{ConfigError, ConfigResult, GCodeFragments, GCodeKind, SliceBuildConfig};
pub use domain::BuildDirection;
pub use machine::{MachineConfig, MachineResolution};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "UV DLP Slicer";
