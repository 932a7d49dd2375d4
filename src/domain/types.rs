// ==========================================
// UV DLP 切片配置 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::error::ConfigError;

// ==========================================
// 构建方向 (Build Direction)
// ==========================================
// 序列化格式: 枚举成员名原文 (Top_Down / Bottom_Up)，与配置文件一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildDirection {
    #[serde(rename = "Top_Down")]
    TopDown, // 自上而下
    #[serde(rename = "Bottom_Up")]
    #[default]
    BottomUp, // 自下而上
}

impl BuildDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildDirection::TopDown => "Top_Down",
            BuildDirection::BottomUp => "Bottom_Up",
        }
    }
}

impl fmt::Display for BuildDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildDirection {
    type Err = ConfigError;

    /// 按成员名解析，仅接受两个字面量（允许首尾空白）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Top_Down" => Ok(BuildDirection::TopDown),
            "Bottom_Up" => Ok(BuildDirection::BottomUp),
            other => Err(ConfigError::InvalidDirection(other.to_string())),
        }
    }
}
