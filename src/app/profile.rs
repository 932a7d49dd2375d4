// ==========================================
// UV DLP 切片配置 - 当前配置档位置
// ==========================================
// 职责: 显式携带当前配置档路径，推导片段目录
// 说明: 由调用方传入，不依赖进程级单例
// ==========================================

use std::path::{Path, PathBuf};

use crate::config::gcode::GCodeKind;

/// 配置档文件扩展名
pub const PROFILE_EXTENSION: &str = "xml";

/// 当前配置档位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLocation {
    config_path: PathBuf,
}

impl ProfileLocation {
    /// # 参数
    /// - config_path: 配置档结构化文件路径（如 profiles/resin_a.xml）
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// 按名称在配置目录中定位配置档
    ///
    /// 名称无扩展名时补 `.xml`
    pub fn named(profiles_dir: &Path, name: &str) -> Self {
        let mut path = profiles_dir.join(name);
        if path.extension().is_none() {
            path.set_extension(PROFILE_EXTENSION);
        }
        Self::new(path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 配置档名称（文件名去扩展名）
    pub fn name(&self) -> String {
        self.config_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// 片段目录: <配置档所在目录>/<配置档名>
    pub fn gcode_dir(&self) -> PathBuf {
        let parent = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        parent.join(self.name())
    }

    /// 片段文件路径
    pub fn fragment_path(&self, kind: GCodeKind) -> PathBuf {
        self.gcode_dir().join(kind.file_name())
    }
}

/// 获取默认配置目录
///
/// 优先级:
/// 1. 环境变量 UVDLP_PROFILE_DIR
/// 2. 用户数据目录/uvdlp/profiles
/// 3. ./profiles
pub fn get_default_profile_dir() -> PathBuf {
    if let Ok(path) = std::env::var("UVDLP_PROFILE_DIR") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("uvdlp").join("profiles"),
        None => PathBuf::from("./profiles"),
    }
}
