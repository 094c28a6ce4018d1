use crate::models::TitlePageEntry;
use crate::utils::fountain_constants::{LINE_REGEX, TITLE_REGEX};

/// 文档开头到第一个空行之前的部分
fn top_of_document(text: &str) -> &str {
    match text.find("\n\n") {
        Some(end) => &text[..end],
        None => text,
    }
}

/// 解析文档开头的标题块
///
/// 返回标题页条目，以及标题块在 `text` 中占据的字节长度（未找到时为 0）。
/// `text` 需已去掉前导空白并统一换行符。
pub fn parse_title_block(text: &str) -> (Vec<TitlePageEntry>, usize) {
    let top = top_of_document(text);
    let mut entries: Vec<TitlePageEntry> = Vec::new();
    let mut open: Option<TitlePageEntry> = None;
    let mut found = false;

    for line in top.split('\n') {
        if let Some(caps) = TITLE_REGEX["directive"].captures(line) {
            found = true;
            if let Some(entry) = open.take() {
                entries.push(entry);
            }
            open = Some(TitlePageEntry::new(&caps[1]));
        } else if let Some(caps) = TITLE_REGEX["inline"].captures(line) {
            found = true;
            if let Some(entry) = open.take() {
                entries.push(entry);
            }
            entries.push(TitlePageEntry::with_value(&caps[1], caps[2].trim_end()));
        } else if !found {
            // 首行不是标题键，这一段属于正文
            return (Vec::new(), 0);
        } else {
            let value = line.trim();
            if value.is_empty() {
                continue;
            }
            match open.as_mut() {
                Some(entry) => entry.values.push(value.to_string()),
                // 续行但没有打开的键，并入上一个条目
                None => {
                    if let Some(last) = entries.last_mut() {
                        last.values.push(value.to_string());
                    }
                }
            }
        }
    }

    if let Some(entry) = open.take() {
        entries.push(entry);
    }

    if !found || entries.is_empty() {
        return (Vec::new(), 0);
    }
    (entries, top.len())
}

/// 去掉标题块，只保留正文
///
/// 用于不需要完整解析的“仅正文”视图
pub fn strip_title_block(text: &str) -> String {
    let text = normalize(text);
    let (_, consumed) = parse_title_block(&text);
    text[consumed..].trim_start_matches('\n').to_string()
}

/// 去掉前导空白并统一换行符
pub fn normalize(text: &str) -> String {
    let text = LINE_REGEX["leading_whitespace"].replace(text, "");
    LINE_REGEX["line_breaks"].replace_all(&text, "\n").to_string()
}

/// 标记解析器使用的标题页解析
///
/// 与逐行解析相互独立：只认可缩进的续行
pub fn parse_title_page_markup(text: &str) -> Vec<TitlePageEntry> {
    let block = match TITLE_REGEX["block"].find(text) {
        Some(m) => m.as_str(),
        None => return Vec::new(),
    };

    let mut entries: Vec<TitlePageEntry> = Vec::new();
    for line in block.split('\n') {
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = TITLE_REGEX["data"].captures(line) {
            if let Some(last) = entries.last_mut() {
                last.values.push(caps[1].trim().to_string());
            }
        } else if let Some(caps) = TITLE_REGEX["inline"].captures(line) {
            entries.push(TitlePageEntry::with_value(&caps[1], caps[2].trim_end()));
        } else if let Some(caps) = TITLE_REGEX["directive"].captures(line) {
            entries.push(TitlePageEntry::new(&caps[1]));
        }
    }
    entries
}

/// 标记解析器的正文：去掉标题块，前后各补两个换行
pub fn markup_body(text: &str) -> String {
    let mut padded = text.to_string();
    padded.push_str("\n\n");
    let body = match TITLE_REGEX["block"].find(&padded) {
        Some(m) => &padded[m.end()..],
        None => padded.as_str(),
    };
    format!("\n\n{}\n\n", body.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_block_inline_and_multiline() {
        let text = "Title: Demo\nAuthor: A. Writer\nContact:\n  Someone\n  Somewhere\n\nINT. ROOM - DAY";
        let (entries, consumed) = parse_title_block(text);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].key, "title");
        assert_eq!(entries[1].key, "authors");
        assert_eq!(entries[2].values, vec!["Someone", "Somewhere"]);
        assert_eq!(&text[consumed..consumed + 2], "\n\n");
    }

    #[test]
    fn test_no_title_block_consumes_nothing() {
        let (entries, consumed) = parse_title_block("## Act I\n### MUSIC: Jazz\n\nINT. ROOM - DAY");
        assert!(entries.is_empty());
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_title_block_must_start_with_key() {
        let (entries, consumed) = parse_title_block("He walks in.\nSign: OPEN\n\nINT. SHOP - DAY");
        assert!(entries.is_empty(), "首行不是标题键时不应识别标题块");
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_strip_title_block() {
        let body = strip_title_block("Title: Demo\n\nINT. ROOM - DAY\n");
        assert_eq!(body, "INT. ROOM - DAY\n");
    }

    #[test]
    fn test_markup_title_page() {
        let entries = parse_title_page_markup("Title:\n\tBig Fish\nAuthor: John August\n\nFADE IN:");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].values, vec!["Big Fish"]);
        assert_eq!(entries[1].key, "authors");
    }
}
