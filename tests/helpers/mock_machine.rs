// ==========================================
// Mock 机器配置 - 用于集成测试
// ==========================================

use uvdlp_slice_config::MachineResolution;

/// Mock 机器配置
#[derive(Debug, Clone)]
pub struct MockMachine {
    pub pix_per_mm_x: f64,
    pub pix_per_mm_y: f64,
    pub x_res: i32,
    pub y_res: i32,
}

impl MockMachine {
    /// 1080p 投影机
    pub fn hd_projector() -> Self {
        Self {
            pix_per_mm_x: 19.2,
            pix_per_mm_y: 19.3,
            x_res: 1920,
            y_res: 1080,
        }
    }
}

impl MachineResolution for MockMachine {
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
