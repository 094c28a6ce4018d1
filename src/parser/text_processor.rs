use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::utils::FountainConstants;

lazy_static! {
    static ref BONEYARD: Regex = Regex::new(r"\n/\*([^<>]+?)\*/\n").unwrap();
    static ref BRACKET_COMMENT: Regex = Regex::new(r"\n\[\[([^<>]+?)\]\]\n").unwrap();
}

// 转义 < > 以及 ...，避免与标签和转场规则冲突
pub fn escape_markup(text: &str) -> String {
    FountainConstants::escapes()
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

// 还原转义
pub fn restore_markup(text: &str) -> String {
    FountainConstants::escapes()
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(to, from))
}

// 注释块内部的换行替换为占位符，使逐行规则看不到它们
pub fn mask_comment_newlines(text: &str) -> String {
    let sentinel = FountainConstants::NEWLINE_SENTINEL;
    let masked = BONEYARD.replace_all(text, |caps: &Captures| {
        format!("\n/*{}*/\n", caps[1].replace('\n', sentinel))
    });
    BRACKET_COMMENT
        .replace_all(&masked, |caps: &Captures| {
            format!("\n[[{}]]\n", caps[1].replace('\n', sentinel))
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_roundtrip() {
        let text = "> THE END < ...";
        let escaped = escape_markup(text);
        assert_eq!(escaped, "&gt; THE END &lt; ::trip::");
        assert_eq!(restore_markup(&escaped), text);
    }

    #[test]
    fn test_mask_comment_newlines() {
        let masked = mask_comment_newlines("\n/*\nhidden\n*/\n");
        assert_eq!(masked, "\n/*@@@@@hidden@@@@@*/\n");
    }
}
