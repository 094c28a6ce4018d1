use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

pub struct FountainConstants;

impl FountainConstants {
    /// 注释块内换行的占位符
    pub const NEWLINE_SENTINEL: &'static str = "@@@@@";
    /// 省略号占位符，避免与转场规则冲突
    pub const ELLIPSIS_SENTINEL: &'static str = "::trip::";
    /// 固定写法的转场
    pub const TRANSITIONS: [&'static str; 3] = ["FADE OUT.", "CUT TO BLACK.", "FADE TO BLACK."];
    /// 分页符的写回形式
    pub const PAGE_BREAK: &'static str = "====";

    /// 标记解析器中需要转义的字符
    pub fn escapes() -> [(&'static str, &'static str); 3] {
        [
            ("<", "&lt;"),
            (">", "&gt;"),
            ("...", Self::ELLIPSIS_SENTINEL),
        ]
    }
}

lazy_static! {
    // 标题页正则
    pub static ref TITLE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("directive", Regex::new(r"^(\p{L}[^:.\n]*):[\t ]*$").unwrap());
        map.insert("inline", Regex::new(r"^(\p{L}[^:.\n]*):[\t ]*(\S.*)$").unwrap());
        map.insert("block", Regex::new(r"^(?:\p{L}[^:.\n]*:(?:[ \t]*|\n)[^\n]*\n(?:[ \t]+[^\n]*\n)*)+\n").unwrap());
        map.insert("data", Regex::new(r"^(?:[ ]{2,8}|\t)([^<>]+)$").unwrap());
        map
    };

    // 逐行解析使用的正则
    pub static ref LINE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("leading_whitespace", Regex::new(r"^\s*").unwrap());
        map.insert("line_breaks", Regex::new(r"\r\n|\r|\n").unwrap());
        map.insert("two_spaces", Regex::new(r"^\s{2}$").unwrap());
        map.insert("whitespace_only", Regex::new(r"^\s{2,}$").unwrap());
        map.insert("boneyard_open", Regex::new(r"^/\*").unwrap());
        map.insert("boneyard_close", Regex::new(r"\*/\s*$").unwrap());
        map.insert("page_break", Regex::new(r"^={3,}\s*$").unwrap());
        map.insert("synopsis", Regex::new(r"^\s*=").unwrap());
        map.insert("comment", Regex::new(r"^\s*\[{2}\s*([^\]\n])+\s*\]{2}\s*$").unwrap());
        map.insert("section", Regex::new(r"^\s*(#+)").unwrap());
        map.insert("scene_number", Regex::new(r"#([^\n#]*?)#\s*$").unwrap());
        map.insert("scene_heading", Regex::new(r"(?i)^(INT|EXT|EST|(I|INT)\.?/(E|EXT)\.?)[.\-\s][^\n]+$").unwrap());
        map.insert("transition", Regex::new(r"^[^a-z]*TO:$").unwrap());
        map.insert("character", Regex::new(r"^[^a-z]+(\(cont'd\))?$").unwrap());
        map.insert("dual_marker", Regex::new(r"\s*\^\s*$").unwrap());
        map.insert("parenthetical", Regex::new(r"^\s*\(").unwrap());
        map
    };
}

/// 文本是否符合自然场景标题写法（无需 `.` 强制）
pub fn is_natural_scene_heading(text: &str) -> bool {
    LINE_REGEX["scene_heading"].is_match(text)
}

/// 文本是否符合自然转场写法（无需 `>` 强制）
pub fn is_natural_transition(text: &str) -> bool {
    LINE_REGEX["transition"].is_match(text)
        || FountainConstants::TRANSITIONS.contains(&text.trim_start())
}

/// 拆出行尾的 `#编号#`，返回去掉编号后的文本和编号
pub fn split_scene_number(line: &str) -> (String, Option<String>) {
    match LINE_REGEX["scene_number"].captures(line) {
        Some(caps) => {
            let number = caps.get(1).map(|m| m.as_str().to_string());
            let whole = caps.get(0).map_or(line.len(), |m| m.start());
            (line[..whole].to_string(), number)
        }
        None => (line.to_string(), None),
    }
}
