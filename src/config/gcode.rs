// ==========================================
// UV DLP 切片配置 - G 代码片段
// ==========================================
// 职责: 四段可注入代码片段（文件头/文件尾/抬升前/抬升后）的默认值与文件读写
// 存储: <配置目录>/<配置名>/{start,end,prelift,postlift}.gcode
// 红线: 单个片段文件失败不阻断其他片段
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::config::error::{ConfigError, ConfigResult};

/// 片段文件扩展名
pub const GCODE_EXTENSION: &str = "gcode";

// ===== 内置默认模板 =====

const DEFAULT_HEADER: &[&str] = &[
    "(********** Header Start ********)\r\n",
    "(Generated by UV - DLP Slicer)\r\n",
    "G21 (Set units to be mm)\r\n",
    "G91 (Relative Positioning)\r\n",
    "M17 (Enable motors)\r\n",
    "(********** Header End **********)\r\n",
];

const DEFAULT_FOOTER: &[&str] = &[
    "(********** Footer Start ********)\r\n",
    "\r\n",
    "(<Completed>)\r\n", // 完成标记
    "(********** Footer End ********)\r\n",
];

const DEFAULT_PRE_LIFT: &[&str] = &["\r\n"];

const DEFAULT_POST_LIFT: &[&str] = &["\r\n"];

// ==========================================
// 片段种类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GCodeKind {
    Start,    // 文件头
    End,      // 文件尾
    PreLift,  // 每层抬升前
    PostLift, // 每层抬升后
}

impl GCodeKind {
    pub const ALL: [GCodeKind; 4] = [
        GCodeKind::Start,
        GCodeKind::End,
        GCodeKind::PreLift,
        GCodeKind::PostLift,
    ];

    /// 片段文件名（不含扩展名）
    pub fn file_stem(&self) -> &'static str {
        match self {
            GCodeKind::Start => "start",
            GCodeKind::End => "end",
            GCodeKind::PreLift => "prelift",
            GCodeKind::PostLift => "postlift",
        }
    }

    /// 片段文件名
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem(), GCODE_EXTENSION)
    }

    /// 内置默认文本
    pub fn default_text(&self) -> String {
        let template = match self {
            GCodeKind::Start => DEFAULT_HEADER,
            GCodeKind::End => DEFAULT_FOOTER,
            GCodeKind::PreLift => DEFAULT_PRE_LIFT,
            GCodeKind::PostLift => DEFAULT_POST_LIFT,
        };
        template.concat()
    }
}

impl fmt::Display for GCodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

// ==========================================
// GCodeFragments - 四段代码片段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GCodeFragments {
    /// 插入文件开头
    pub header: String,
    /// 插入文件结尾
    pub footer: String,
    /// 插入每层抬升之前
    pub pre_lift: String,
    /// 插入每层抬升之后
    pub post_lift: String,
}

impl Default for GCodeFragments {
    fn default() -> Self {
        Self {
            header: GCodeKind::Start.default_text(),
            footer: GCodeKind::End.default_text(),
            pre_lift: GCodeKind::PreLift.default_text(),
            post_lift: GCodeKind::PostLift.default_text(),
        }
    }
}

impl GCodeFragments {
    pub fn get(&self, kind: GCodeKind) -> &str {
        match kind {
            GCodeKind::Start => &self.header,
            GCodeKind::End => &self.footer,
            GCodeKind::PreLift => &self.pre_lift,
            GCodeKind::PostLift => &self.post_lift,
        }
    }

    pub fn get_mut(&mut self, kind: GCodeKind) -> &mut String {
        match kind {
            GCodeKind::Start => &mut self.header,
            GCodeKind::End => &mut self.footer,
            GCodeKind::PreLift => &mut self.pre_lift,
            GCodeKind::PostLift => &mut self.post_lift,
        }
    }

    /// 从目录读取四个片段文件；缺失/不可读的文件得到空串
    pub fn load_from_dir(&mut self, dir: &Path) {
        for kind in GCodeKind::ALL {
            *self.get_mut(kind) = load_file(&dir.join(kind.file_name()));
        }
    }

    /// 将四个片段写入目录；逐个写入，返回第一个失败
    pub fn save_to_dir(&self, dir: &Path) -> ConfigResult<()> {
        let mut first_err = None;
        for kind in GCodeKind::ALL {
            if let Err(e) = save_file(&dir.join(kind.file_name()), self.get(kind)) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ==========================================
// 单文件文本读写
// ==========================================

/// 读取整个文件文本；仅 IO 失败时记录日志并返回空串
///
/// 编码: UTF-8（可带 BOM）、带 BOM 的 UTF-16，其余按 Latin-1 逐字节解码
pub fn load_file(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => decode_text(&bytes),
        Err(e) => {
            tracing::warn!("片段文件读取失败: {}", ConfigError::io(path, e));
            String::new()
        }
    }
}

/// 将片段文件字节解码为文本，不因编码问题丢弃内容
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8_or_latin1(rest),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => decode_utf8_or_latin1(bytes),
    }
}

fn decode_utf8_or_latin1(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("片段文件不是 UTF-8，按 Latin-1 解码");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// 以给定文本覆盖写入文件；失败时记录日志并返回错误
pub fn save_file(path: &Path, contents: &str) -> ConfigResult<()> {
    std::fs::write(path, contents).map_err(|e| {
        let err = ConfigError::io(path, e);
        tracing::error!("片段文件写入失败: {}", err);
        err
    })
}
