// ==========================================
// UV DLP 切片配置 - 切片/构建参数
// ==========================================
// 职责: 切片与逐层曝光参数、默认值、XML 持久化、参数摘要、G 代码片段管理
// 存储: <profile>.xml（结构化字段） + <profile>/ 目录（四个片段文件）
// 红线: 片段不写入 XML；加载失败时已读字段保留，不回滚
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::app::profile::ProfileLocation;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::gcode::GCodeFragments;
use crate::config::xml_fields::{format_bool, FieldReader, FieldWriter};
use crate::domain::types::BuildDirection;
use crate::machine::MachineResolution;

/// XML 根元素名
pub const ROOT_ELEMENT: &str = "SliceBuildConfig";

/// XML 字段名（按文件中的顺序）
pub mod fields {
    pub const DOTS_PER_MM_X: &str = "DotsPermmX";
    pub const DOTS_PER_MM_Y: &str = "DotsPermmY";
    pub const X_RESOLUTION: &str = "XResolution";
    pub const Y_RESOLUTION: &str = "YResolution";
    pub const SLICE_HEIGHT: &str = "SliceHeight";
    pub const LAYER_TIME: &str = "LayerTime";
    pub const FIRST_LAYER_TIME: &str = "FirstLayerTime";
    pub const BLANK_TIME: &str = "BlankTime";
    pub const PLATFORM_TEMP: &str = "PlatformTemp";
    pub const EXPORT_GCODE: &str = "ExportGCode";
    pub const EXPORT_SVG: &str = "ExportSVG";
    pub const EXPORT_IMAGES: &str = "ExportImages";
    pub const X_OFFSET: &str = "XOffset";
    pub const Y_OFFSET: &str = "YOffset";
    pub const DIRECTION: &str = "Direction";
    pub const LIFT_DISTANCE: &str = "LiftDistance";

    pub const ALL: [&str; 16] = [
        DOTS_PER_MM_X,
        DOTS_PER_MM_Y,
        X_RESOLUTION,
        Y_RESOLUTION,
        SLICE_HEIGHT,
        LAYER_TIME,
        FIRST_LAYER_TIME,
        BLANK_TIME,
        PLATFORM_TEMP,
        EXPORT_GCODE,
        EXPORT_SVG,
        EXPORT_IMAGES,
        X_OFFSET,
        Y_OFFSET,
        DIRECTION,
        LIFT_DISTANCE,
    ];
}

// ==========================================
// SliceBuildConfig - 切片/构建参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceBuildConfig {
    // ===== 分辨率/密度 =====
    /// X 方向像素密度（点/毫米）
    pub dpmm_x: f64,
    /// Y 方向像素密度（点/毫米）
    pub dpmm_y: f64,
    /// 输出图像 X 分辨率（像素）
    pub x_res: i32,
    /// 输出图像 Y 分辨率（像素）
    pub y_res: i32,
    /// X 像素偏移
    pub x_offset: i32,
    /// Y 像素偏移
    pub y_offset: i32,

    // ===== 切片参数 =====
    /// 层厚（毫米）
    pub z_thick: f64,
    /// 每层曝光时间（毫秒）
    pub layer_time_ms: i32,
    /// 首层曝光时间（毫秒）
    pub first_layer_time_ms: i32,
    /// 层间消隐时间（毫秒）
    pub blank_time_ms: i32,
    pub direction: BuildDirection,
    /// 抬升/回退距离
    pub lift_distance: f64,

    /// 平台目标温度（摄氏度）
    pub plat_temp: i32,

    // ===== 输出开关 =====
    pub export_gcode: bool,
    pub export_svg: bool,
    pub export_images: bool,

    /// G 代码片段（独立于 XML 持久化）
    pub gcode: GCodeFragments,
}

impl Default for SliceBuildConfig {
    fn default() -> Self {
        Self {
            dpmm_x: 102.4,
            dpmm_y: 76.8,
            x_res: 1024,
            y_res: 768,
            x_offset: 0,
            y_offset: 0,
            z_thick: 0.025,
            layer_time_ms: 1000,
            first_layer_time_ms: 5000,
            blank_time_ms: 2000,
            direction: BuildDirection::BottomUp,
            lift_distance: 5.0,
            plat_temp: 75,
            export_gcode: true,
            export_svg: false,
            export_images: false,
            gcode: GCodeFragments::default(),
        }
    }
}

impl SliceBuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将全部字段（含片段）重置为内置默认值
    pub fn create_default(&mut self) {
        *self = Self::default();
    }

    /// 仅将四个片段重置为内置默认文本
    pub fn set_default_codes(&mut self) {
        self.gcode = GCodeFragments::default();
    }

    /// 从机器配置同步分辨率与像素密度（仅这四个字段）
    pub fn update_from(&mut self, machine: &dyn MachineResolution) {
        self.dpmm_x = machine.pix_per_mm_x();
        self.dpmm_y = machine.pix_per_mm_y();
        self.x_res = machine.x_res();
        self.y_res = machine.y_res();
    }

    // ==========================================
    // XML 持久化
    // ==========================================

    /// 从 XML 文件加载
    ///
    /// # 流程
    /// 1. 刷新 G 代码片段（与 XML 是否存在无关）
    /// 2. 按固定顺序读取 16 个字段，遇到第一个错误即中止
    ///
    /// # 返回
    /// - Ok(()): 全部字段已更新
    /// - Err: 已记录日志；出错前已读取的字段保留
    pub fn load(&mut self, path: &Path, profile: &ProfileLocation) -> ConfigResult<()> {
        if self.load_gcodes(profile).is_err() {
            tracing::warn!("G 代码片段加载失败，继续读取配置文件: {}", path.display());
        }

        self.read_fields(path).map_err(|e| {
            tracing::error!("切片配置加载失败 ({}): {}", path.display(), e);
            e
        })
    }

    fn read_fields(&mut self, path: &Path) -> ConfigResult<()> {
        let xml = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let mut r = FieldReader::new(&xml);

        r.read_start_element(ROOT_ELEMENT)?;
        self.dpmm_x = r.read_element(fields::DOTS_PER_MM_X)?;
        self.dpmm_y = r.read_element(fields::DOTS_PER_MM_Y)?;
        self.x_res = r.read_element(fields::X_RESOLUTION)?;
        self.y_res = r.read_element(fields::Y_RESOLUTION)?;
        self.z_thick = r.read_element(fields::SLICE_HEIGHT)?;
        self.layer_time_ms = r.read_element(fields::LAYER_TIME)?;
        self.first_layer_time_ms = r.read_element(fields::FIRST_LAYER_TIME)?;
        self.blank_time_ms = r.read_element(fields::BLANK_TIME)?;
        self.plat_temp = r.read_element(fields::PLATFORM_TEMP)?;
        self.export_gcode = r.read_bool(fields::EXPORT_GCODE)?;
        self.export_svg = r.read_bool(fields::EXPORT_SVG)?;
        self.export_images = r.read_bool(fields::EXPORT_IMAGES)?;
        self.x_offset = r.read_element(fields::X_OFFSET)?;
        self.y_offset = r.read_element(fields::Y_OFFSET)?;
        self.direction = r.read_element_string(fields::DIRECTION)?.parse()?;
        self.lift_distance = r.read_element(fields::LIFT_DISTANCE)?;
        r.read_end_element(ROOT_ELEMENT)?;

        tracing::debug!("切片配置已加载: {}", path.display());
        Ok(())
    }

    /// 保存到 XML 文件（不含 G 代码片段）
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.write_fields(path).map_err(|e| {
            tracing::error!("切片配置保存失败 ({}): {}", path.display(), e);
            e
        })
    }

    fn write_fields(&self, path: &Path) -> ConfigResult<()> {
        let mut w = FieldWriter::new(ROOT_ELEMENT)?;
        w.write_element(fields::DOTS_PER_MM_X, &self.dpmm_x.to_string())?;
        w.write_element(fields::DOTS_PER_MM_Y, &self.dpmm_y.to_string())?;
        w.write_element(fields::X_RESOLUTION, &self.x_res.to_string())?;
        w.write_element(fields::Y_RESOLUTION, &self.y_res.to_string())?;
        w.write_element(fields::SLICE_HEIGHT, &self.z_thick.to_string())?;
        w.write_element(fields::LAYER_TIME, &self.layer_time_ms.to_string())?;
        w.write_element(fields::FIRST_LAYER_TIME, &self.first_layer_time_ms.to_string())?;
        w.write_element(fields::BLANK_TIME, &self.blank_time_ms.to_string())?;
        w.write_element(fields::PLATFORM_TEMP, &self.plat_temp.to_string())?;
        w.write_element(fields::EXPORT_GCODE, format_bool(self.export_gcode))?;
        w.write_element(fields::EXPORT_SVG, format_bool(self.export_svg))?;
        w.write_element(fields::EXPORT_IMAGES, format_bool(self.export_images))?;
        w.write_element(fields::X_OFFSET, &self.x_offset.to_string())?;
        w.write_element(fields::Y_OFFSET, &self.y_offset.to_string())?;
        w.write_element(fields::DIRECTION, self.direction.as_str())?;
        w.write_element(fields::LIFT_DISTANCE, &self.lift_distance.to_string())?;
        let bytes = w.finish()?;

        std::fs::write(path, bytes).map_err(|e| ConfigError::io(path, e))?;
        tracing::debug!("切片配置已保存: {}", path.display());
        Ok(())
    }

    /// 使用配置档自身路径加载
    pub fn load_profile(&mut self, profile: &ProfileLocation) -> ConfigResult<()> {
        self.load(profile.config_path(), profile)
    }

    /// 保存配置档: XML 字段 + 四个片段文件
    pub fn save_profile(&self, profile: &ProfileLocation) -> ConfigResult<()> {
        self.save(profile.config_path())?;
        self.save_default_gcodes(profile)
    }

    // ==========================================
    // G 代码片段管理
    // ==========================================

    /// 加载片段
    ///
    /// - 片段目录不存在: 创建目录，片段重置为默认值并写出四个文件
    /// - 片段目录已存在: 逐个读取文件，缺失的文件得到空串
    pub fn load_gcodes(&mut self, profile: &ProfileLocation) -> ConfigResult<()> {
        let dir = profile.gcode_dir();
        if dir.is_dir() {
            self.gcode.load_from_dir(&dir);
            tracing::debug!("G 代码片段已加载: {}", dir.display());
            return Ok(());
        }

        std::fs::create_dir_all(&dir).map_err(|e| {
            let err = ConfigError::io(&dir, e);
            tracing::error!("片段目录创建失败: {}", err);
            err
        })?;
        tracing::info!("片段目录不存在，已创建并写入默认片段: {}", dir.display());
        self.set_default_codes();
        self.save_default_gcodes(profile)
    }

    /// 将当前四个片段写入片段目录（目录缺失时创建）
    pub fn save_default_gcodes(&self, profile: &ProfileLocation) -> ConfigResult<()> {
        let dir = profile.gcode_dir();
        std::fs::create_dir_all(&dir).map_err(|e| {
            let err = ConfigError::io(&dir, e);
            tracing::error!("片段目录创建失败: {}", err);
            err
        })?;
        self.gcode.save_to_dir(&dir)
    }

    // ==========================================
    // 快照
    // ==========================================

    /// 完整配置（含片段）的 JSON 快照
    pub fn to_snapshot_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_snapshot_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// 参数摘要，作为注释写入生成的 G 代码
impl fmt::Display for SliceBuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(****Build and Slicing Parameters****)\r\n")?;
        write!(f, "(dots per mm X           = {} )\r\n", self.dpmm_x)?;
        write!(f, "(dots per mm Y           = {} )\r\n", self.dpmm_y)?;
        write!(f, "(X resolution            = {} )\r\n", self.x_res)?;
        write!(f, "(Y resolution            = {} )\r\n", self.y_res)?;
        write!(f, "(X Pixel Offset          = {} )\r\n", self.x_offset)?;
        write!(f, "(Y Pixel Offset          = {} )\r\n", self.y_offset)?;
        write!(f, "(Layer thickness         = {} )\r\n", self.z_thick)?;
        write!(f, "(Layer Time              = {})\r\n", self.layer_time_ms)?;
        write!(f, "(First Layer Time        = {})\r\n", self.first_layer_time_ms)?;
        write!(f, "(Blanking Layer Time     = {})\r\n", self.blank_time_ms)?;
        write!(f, "(Platform Temp           = {})\r\n", self.plat_temp)?;
        write!(f, "(Build Direction         = {})\r\n", self.direction)?;
        write!(f, "(Lift Distance           = {})\r\n", self.lift_distance)
    }
}
