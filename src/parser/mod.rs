pub mod fast_parser;
pub mod fountain_parser;
pub mod substitution;
pub mod text_processor;
pub mod title_page;

use serde::{Deserialize, Serialize};

use crate::error::FountainResult;
use crate::models::{FountainElement, TitlePageEntry};

pub use fast_parser::FastFountainParser;
pub use fountain_parser::FountainParser;
pub use title_page::{parse_title_block, strip_title_block};

/// 解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserType {
    /// 单遍逐行状态机（默认）
    #[default]
    Fast,
    /// 多遍正则替换的标记解析器
    Markup,
}

/// 解析结果：元素序列和标题页
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutput {
    pub elements: Vec<FountainElement>,
    pub title_page: Vec<TitlePageEntry>,
}

impl ParserType {
    /// 用选定的策略解析文本
    pub fn parse(&self, text: &str) -> FountainResult<ParseOutput> {
        match self {
            ParserType::Fast => Ok(FastFountainParser::new().parse(text)),
            ParserType::Markup => FountainParser::new()?.parse(text),
        }
    }
}
