// ==========================================
// UV DLP 切片配置 - 应用层
// ==========================================
// 职责: 配置档定位（替代进程级单例）
// ==========================================

pub mod profile;

pub use profile::{get_default_profile_dir, ProfileLocation, PROFILE_EXTENSION};
