pub mod fountain_constants;

use serde::Serialize;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::FountainResult;

pub use fountain_constants::FountainConstants;

/// 按字素簇计算文本长度
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// 以空白分隔统计单词数
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 每个单词首字母大写，其余小写
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut graphemes = word.graphemes(true);
            match graphemes.next() {
                Some(first) => {
                    let rest: String = graphemes.collect();
                    format!("{}{}", first.to_uppercase(), rest.to_lowercase())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 去掉扩展名后的文件名，例如 `TestScript.fountain` -> `TestScript`
pub fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string())
}

/// 去掉首尾换行（保留空格）
pub fn trim_newlines(text: &str) -> &str {
    text.trim_matches(|c| c == '\n' || c == '\r')
}

/// 格式化输出 JSON，对象键按字母排序
pub fn to_sorted_json<T: Serialize>(value: &T) -> FountainResult<String> {
    // serde_json 的 Map 默认基于 BTreeMap，转成 Value 后键即有序
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("draft date"), "Draft Date");
        assert_eq!(capitalize_words("AUTHOR"), "Author");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("TestScript.fountain"), "TestScript");
        assert_eq!(file_stem("NoExtension"), "NoExtension");
    }

    #[test]
    fn test_grapheme_len() {
        assert_eq!(grapheme_len("黑色爱情诗"), 5);
        assert_eq!(grapheme_len("e\u{301}"), 1);
    }
}
