//! 文档容器：纯文本 `.fountain`、TextBundle 目录、Highland 压缩包
//!
//! 这些都只是读写原始文本的外壳，不包含任何解析逻辑。

pub mod highland;
pub mod textbundle;

use std::fs;
use std::path::Path;

use crate::error::{FountainError, FountainResult};
use crate::parser::strip_title_block;

pub const FOUNTAIN_EXTENSION: &str = "fountain";
pub const TEXTBUNDLE_EXTENSION: &str = "textbundle";
pub const HIGHLAND_EXTENSION: &str = "highland";
/// 没有 .fountain 文件时依次尝试的约定文件名
pub const MARKDOWN_FALLBACKS: [&str; 2] = ["text.md", "text.markdown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Fountain,
    TextBundle,
    Highland,
}

impl DocumentFormat {
    /// 按扩展名识别格式
    pub fn from_path(path: &Path) -> FountainResult<DocumentFormat> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            FOUNTAIN_EXTENSION => Ok(DocumentFormat::Fountain),
            TEXTBUNDLE_EXTENSION => Ok(DocumentFormat::TextBundle),
            HIGHLAND_EXTENSION => Ok(DocumentFormat::Highland),
            _ => Err(FountainError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// 读取到的内容文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// 内容文件名（不含目录）
    pub file_name: String,
    pub text: String,
}

/// 在候选文件名中挑选内容文件：优先 .fountain，其次 text.md、text.markdown
pub fn pick_content_name<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let is_fountain = |name: &str| {
        Path::new(name)
            .extension()
            .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case(FOUNTAIN_EXTENSION))
    };
    if let Some(name) = names.iter().copied().find(|name| is_fountain(*name)) {
        return Some(name);
    }
    MARKDOWN_FALLBACKS
        .iter()
        .find_map(|fallback| names.iter().find(|name| *name == fallback).copied())
}

/// 读取任意受支持格式的原始文本
pub fn read_content(path: &Path) -> FountainResult<ResolvedContent> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Fountain => Ok(ResolvedContent {
            file_name: file_name_of(path),
            text: fs::read_to_string(path)?,
        }),
        DocumentFormat::TextBundle => textbundle::read_text_bundle(path),
        DocumentFormat::Highland => highland::read_highland(path),
    }
}

/// 仅正文视图：纯文本文件会去掉开头的标题块，包内文本原样返回
pub fn get_content(path: &Path) -> FountainResult<String> {
    let format = DocumentFormat::from_path(path)?;
    let content = read_content(path)?;
    match format {
        DocumentFormat::Fountain => Ok(strip_title_block(&content.text)),
        _ => Ok(content.text),
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_prefers_fountain() {
        let names = ["text.md", "info.json", "Draft.fountain"];
        assert_eq!(pick_content_name(names.iter().copied()), Some("Draft.fountain"));
    }

    #[test]
    fn test_pick_markdown_fallback_order() {
        assert_eq!(pick_content_name(["text.markdown", "text.md"]), Some("text.md"));
        assert_eq!(pick_content_name(["info.json", "text.markdown"]), Some("text.markdown"));
        assert_eq!(pick_content_name(["info.json"]), None);
    }

    #[test]
    fn test_unsupported_format() {
        let result = DocumentFormat::from_path(Path::new("script.docx"));
        assert!(matches!(result, Err(FountainError::UnsupportedFormat(_))));
    }
}
