use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::FountainResult;
use crate::parser::ParserType;

/// 默认的后备标题
pub const DEFAULT_FALLBACK_TITLE: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 使用的解析策略
    pub parser: ParserType,
    /// 写回时是否省略场景编号
    pub suppress_scene_numbers: bool,
    /// 既没有标题也没有文件名时，大纲使用的标题
    pub fallback_title: String,
    /// 导出包时是否附带 characters.json 与 outline.json
    pub include_resources: bool,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            parser: ParserType::Fast,
            suppress_scene_numbers: false,
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            include_resources: true,
        }
    }
}

impl Conf {
    /// 从 JSON 配置文件读取，缺失的字段使用默认值
    pub fn from_json_file(path: impl AsRef<Path>) -> FountainResult<Conf> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
