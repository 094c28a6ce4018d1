//! 把剧本模型写回 Fountain 文本
//!
//! 写回不保证与原文逐字节一致，但再次解析后元素类型、居中、双对白、
//! 强制场景标题和场景编号都能保持。

use crate::models::{ElementType, FountainElement, FountainScript, TitlePageEntry};
use crate::utils::fountain_constants::{is_natural_scene_heading, is_natural_transition, FountainConstants};
use crate::utils::{capitalize_words, trim_newlines};

/// 完整文档：标题页 + 空行 + 正文
pub fn document_string(script: &FountainScript) -> String {
    let text = format!("{}\n{}", title_page_string(&script.title_page), body_string(script));
    trim_newlines(&text).to_string()
}

/// 标题页
pub fn title_page_string(entries: &[TitlePageEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let key = if entry.key == "authors" && entry.values.len() == 1 {
            "author".to_string()
        } else {
            entry.key.clone()
        };
        let key = capitalize_words(&key);

        match entry.values.as_slice() {
            [value] => out.push_str(&format!("{}: {}\n", key, value)),
            values => {
                out.push_str(&format!("{}:\n", key));
                for value in values {
                    out.push_str(&format!("\t{}\n", value));
                }
            }
        }
    }
    out
}

/// 正文
pub fn body_string(script: &FountainScript) -> String {
    let mut out = String::new();
    let mut dual_count = 0usize;

    for element in &script.elements {
        if element.text.trim().is_empty() && element.kind != ElementType::PageBreak {
            continue;
        }

        let text = element_text(element, script.suppress_scene_numbers, &mut dual_count);
        if element.kind.is_dialogue_part() {
            out.push_str(&text);
            out.push('\n');
        } else {
            out.push('\n');
            out.push_str(&text);
            out.push('\n');
        }
    }
    out
}

fn element_text(element: &FountainElement, suppress_scene_numbers: bool, dual_count: &mut usize) -> String {
    let text = element.text.as_str();
    let mut out = match element.kind {
        ElementType::Comment => format!("\n[[{}]]", text),
        ElementType::Boneyard => format!("/*{}*/", text),
        ElementType::Synopsis => format!("={}", text),
        ElementType::PageBreak => FountainConstants::PAGE_BREAK.to_string(),
        ElementType::SectionHeading => format!("{}{}", "#".repeat(element.section_depth.max(1)), text),
        ElementType::SceneHeading => {
            let mut heading = if is_natural_scene_heading(text) {
                text.to_string()
            } else {
                format!(".{}", text)
            };
            if let (Some(number), false) = (&element.scene_number, suppress_scene_numbers) {
                heading.push_str(&format!(" #{}#", number));
            }
            heading
        }
        ElementType::Transition if !is_natural_transition(text) => format!("> {}", text),
        ElementType::Character if element.is_dual_dialogue => {
            *dual_count += 1;
            if *dual_count % 2 == 0 {
                format!("{} ^", text)
            } else {
                text.to_string()
            }
        }
        _ => text.to_string(),
    };

    if element.is_centered {
        out = if out.ends_with(' ') {
            format!("> {}<", out)
        } else {
            format!("> {} <", out)
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_author_is_written_singular() {
        let entries = vec![
            TitlePageEntry::with_value("title", "Demo"),
            TitlePageEntry::with_value("author", "A. Writer"),
        ];
        assert_eq!(title_page_string(&entries), "Title: Demo\nAuthor: A. Writer\n");
    }

    #[test]
    fn test_multi_value_entry() {
        let mut entry = TitlePageEntry::new("contact");
        entry.values = vec!["Someone".to_string(), "Somewhere".to_string()];
        assert_eq!(title_page_string(&[entry]), "Contact:\n\tSomeone\n\tSomewhere\n");
    }
}
