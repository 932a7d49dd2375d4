// ==========================================
// UV DLP 切片配置 - 机器配置读取接口
// ==========================================
// 用途: 为切片配置提供投影分辨率与像素密度
// 实现者: 机器配置实体（不在本库范围内），测试中为 Mock
// ==========================================

use serde::{Deserialize, Serialize};

/// 机器配置读取接口
pub trait MachineResolution {
    /// X 方向像素密度（像素/毫米）
    fn pix_per_mm_x(&self) -> f64;

    /// Y 方向像素密度（像素/毫米）
    fn pix_per_mm_y(&self) -> f64;

    /// X 方向分辨率（像素）
    fn x_res(&self) -> i32;

    /// Y 方向分辨率（像素）
    fn y_res(&self) -> i32;
}

/// 机器投影参数（最小值对象）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub pix_per_mm_x: f64,
    pub pix_per_mm_y: f64,
    pub x_res: i32,
    pub y_res: i32,
}

impl MachineResolution for MachineConfig {
    fn pix_per_mm_x(&self) -> f64 {
        self.pix_per_mm_x
    }

    fn pix_per_mm_y(&self) -> f64 {
        self.pix_per_mm_y
    }

    fn x_res(&self) -> i32 {
        self.x_res
    }

    fn y_res(&self) -> i32 {
        self.y_res
    }
}
