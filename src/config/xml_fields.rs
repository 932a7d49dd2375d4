// ==========================================
// UV DLP 切片配置 - 有序字段 XML 读写
// ==========================================
// 职责: 按固定顺序读写 <Root><Field>value</Field>...</Root> 形式的文档
// 红线: 只认叶子元素，严格按调用顺序匹配，不做乱序查找
// ==========================================

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;
use std::str::FromStr;

use crate::config::error::{ConfigError, ConfigResult};

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// 解析单个字段文本（失败时带上字段名和原值）
pub fn parse_field<T>(field: &str, raw: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::ParseField {
        field: field.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

/// 布尔字段: 接受 True/False（不区分大小写，允许首尾空白）
pub fn parse_bool_field(field: &str, raw: &str) -> ConfigResult<bool> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::ParseField {
            field: field.to_string(),
            value: raw.to_string(),
            message: "expected True or False".to_string(),
        })
    }
}

/// 布尔字段的规范文本
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

// ==========================================
// FieldReader - 顺序读取器
// ==========================================
pub struct FieldReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> FieldReader<'a> {
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        Self { reader }
    }

    /// 跳过声明/注释/处理指令，返回下一个有意义的事件
    fn next_significant(&mut self) -> ConfigResult<Event<'a>> {
        loop {
            match self.reader.read_event()? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                event => return Ok(event),
            }
        }
    }

    /// 读取根元素开始标签
    pub fn read_start_element(&mut self, name: &str) -> ConfigResult<()> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == name.as_bytes() => Ok(()),
            // <Root/> 没有任何字段
            Event::Empty(e) if e.name().as_ref() == name.as_bytes() => {
                Err(ConfigError::EmptyElement {
                    name: name.to_string(),
                })
            }
            Event::Start(e) | Event::Empty(e) => Err(ConfigError::UnexpectedElement {
                expected: name.to_string(),
                found: element_name(e.name().as_ref()),
            }),
            _ => Err(ConfigError::MissingElement {
                expected: name.to_string(),
            }),
        }
    }

    /// 读取根元素结束标签
    pub fn read_end_element(&mut self, name: &str) -> ConfigResult<()> {
        match self.next_significant()? {
            Event::End(e) if e.name().as_ref() == name.as_bytes() => Ok(()),
            Event::Start(e) | Event::Empty(e) => Err(ConfigError::UnexpectedElement {
                expected: format!("/{}", name),
                found: element_name(e.name().as_ref()),
            }),
            Event::End(e) => Err(ConfigError::UnexpectedElement {
                expected: format!("/{}", name),
                found: format!("/{}", element_name(e.name().as_ref())),
            }),
            _ => Err(ConfigError::MissingElement {
                expected: format!("/{}", name),
            }),
        }
    }

    /// 读取下一个叶子元素的文本内容，元素名必须为 `name`
    pub fn read_element_string(&mut self, name: &str) -> ConfigResult<String> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == name.as_bytes() => {}
            // <Field/> 视为空文本
            Event::Empty(e) if e.name().as_ref() == name.as_bytes() => return Ok(String::new()),
            Event::Start(e) | Event::Empty(e) => {
                return Err(ConfigError::UnexpectedElement {
                    expected: name.to_string(),
                    found: element_name(e.name().as_ref()),
                })
            }
            _ => {
                return Err(ConfigError::MissingElement {
                    expected: name.to_string(),
                })
            }
        }

        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
                Event::End(e) if e.name().as_ref() == name.as_bytes() => return Ok(text),
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ConfigError::UnexpectedElement {
                        expected: format!("/{}", name),
                        found: element_name(e.name().as_ref()),
                    })
                }
                Event::End(e) => {
                    return Err(ConfigError::UnexpectedElement {
                        expected: format!("/{}", name),
                        found: format!("/{}", element_name(e.name().as_ref())),
                    })
                }
                Event::Eof => {
                    return Err(ConfigError::MissingElement {
                        expected: format!("/{}", name),
                    })
                }
                _ => continue,
            }
        }
    }

    pub fn read_element<T>(&mut self, name: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.read_element_string(name)?;
        parse_field(name, &raw)
    }

    pub fn read_bool(&mut self, name: &str) -> ConfigResult<bool> {
        let raw = self.read_element_string(name)?;
        parse_bool_field(name, &raw)
    }
}

// ==========================================
// FieldWriter - 顺序写入器
// ==========================================
pub struct FieldWriter {
    writer: Writer<Vec<u8>>,
    root: String,
}

impl FieldWriter {
    /// 写入 XML 声明并打开根元素
    pub fn new(root: &str) -> ConfigResult<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(quick_xml::Error::from)?;
        writer
            .write_event(Event::Start(BytesStart::new(root)))
            .map_err(quick_xml::Error::from)?;
        Ok(Self {
            writer,
            root: root.to_string(),
        })
    }

    /// 写入一个叶子元素（文本自动转义）
    pub fn write_element(&mut self, name: &str, value: &str) -> ConfigResult<()> {
        for event in [
            Event::Start(BytesStart::new(name)),
            Event::Text(BytesText::new(value)),
            Event::End(BytesEnd::new(name)),
        ] {
            self.writer
                .write_event(event)
                .map_err(quick_xml::Error::from)?;
        }
        Ok(())
    }

    /// 关闭根元素并返回文档字节
    pub fn finish(mut self) -> ConfigResult<Vec<u8>> {
        self.writer
            .write_event(Event::End(BytesEnd::new(self.root.as_str())))
            .map_err(quick_xml::Error::from)?;
        Ok(self.writer.into_inner())
    }
}
