// ==========================================
// UV DLP 切片配置 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 解析错误 / 文件访问错误 / 枚举解析错误
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件访问错误 =====
    #[error("文件访问失败 (path={path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML 读写失败: {0}")]
    Xml(#[from] quick_xml::Error),

    // ===== 结构错误 =====
    #[error("元素顺序错误: expected=<{expected}>, found=<{found}>")]
    UnexpectedElement { expected: String, found: String },

    #[error("缺少元素: <{expected}>")]
    MissingElement { expected: String },

    #[error("元素内容为空: <{name}/>")]
    EmptyElement { name: String },

    // ===== 解析错误 =====
    #[error("字段值解析失败 (field={field}, value={value:?}): {message}")]
    ParseField {
        field: String,
        value: String,
        message: String,
    },

    // ===== 枚举解析错误 =====
    #[error("无效的构建方向: {0:?}")]
    InvalidDirection(String),

    // ===== 快照错误 =====
    #[error("配置快照序列化失败: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl ConfigError {
    /// 附带路径的 IO 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
