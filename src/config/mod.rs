// ==========================================
// UV DLP 切片配置 - 配置层
// ==========================================
// 职责: 切片/构建参数的默认值、持久化与 G 代码片段管理
// 存储: XML 配置档 + 片段目录
// ==========================================

pub mod error;
pub mod gcode;
pub mod slice_build_config;
pub mod xml_fields;

// 重导出核心配置类型
pub use error::{ConfigError, ConfigResult};
pub use gcode::{GCodeFragments, GCodeKind, GCODE_EXTENSION};
pub use slice_build_config::{SliceBuildConfig, ROOT_ELEMENT};
