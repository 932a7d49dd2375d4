// ==========================================
// UV DLP 切片配置 - 领域模型层
// ==========================================
// 职责: 定义领域类型
// 红线: 不含文件读写逻辑
// ==========================================

pub mod types;

// 重导出核心类型
pub use types::BuildDirection;
