use serde::{Deserialize, Serialize};

/// 标题页中的一个键值对
///
/// 键统一为小写，`author` 与 `author(s)` 归一为 `authors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePageEntry {
    pub key: String,
    pub values: Vec<String>,
}

impl TitlePageEntry {
    pub fn new(key: &str) -> Self {
        TitlePageEntry {
            key: normalize_key(key),
            values: Vec::new(),
        }
    }

    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut entry = Self::new(key);
        entry.values.push(value.into());
        entry
    }
}

/// 标题页键名归一化
pub fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase();
    match key.as_str() {
        "author" | "author(s)" => "authors".to_string(),
        _ => key,
    }
}

/// 在标题页中查找键对应的值
pub fn title_values<'a>(entries: &'a [TitlePageEntry], key: &str) -> Option<&'a [String]> {
    let key = normalize_key(key);
    entries
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.values.as_slice())
}
