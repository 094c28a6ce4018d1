use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{FountainResult, StructuralParseError};
use crate::models::{ElementType, FountainElement};
use crate::parser::substitution::{apply_all, compile, CompiledSubstitution, Substitution, SUBSTITUTIONS};
use crate::parser::text_processor::{escape_markup, mask_comment_newlines, restore_markup};
use crate::parser::title_page::{markup_body, normalize, parse_title_page_markup};
use crate::parser::ParseOutput;
use crate::utils::trim_newlines;

lazy_static! {
    // 标签提取及后处理正则
    static ref MARKUP_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("tag", Regex::new(r"<([a-zA-Z\s]+)>([^<>]*)</[a-zA-Z\s]+>").unwrap());
        map.insert("tag_type", Regex::new(r"<([a-zA-Z\s]+)>[^<>]*</[a-zA-Z\s]+>").unwrap());
        map.insert("scene_number", Regex::new(r"(#([0-9A-Za-z.)\-]+)#)").unwrap());
        map.insert("centered", Regex::new(r"^>[^<>\n]+<").unwrap());
        map.insert("centered_text", Regex::new(r"^>?\s*([^<>\n]*?)\s*<?$").unwrap());
        map.insert("section", Regex::new(r"^(#+)([^\n]*)").unwrap());
        map.insert("dual_marker", Regex::new(r"\s*\^\s*$").unwrap());
        map
    };

    // 默认替换表只编译一次
    static ref DEFAULT_SUBSTITUTIONS: Result<Arc<[CompiledSubstitution]>, StructuralParseError> =
        compile(SUBSTITUTIONS).map(Arc::from);
}

/// 标记解析器
///
/// 先把文本逐项替换成 `<类型>内容</类型>` 的中间表示，再从标签中提取元素。
/// 与 [`FastFountainParser`](crate::parser::FastFountainParser) 结果应当一致，
/// 用于交叉验证。
pub struct FountainParser {
    substitutions: Arc<[CompiledSubstitution]>,
}

impl FountainParser {
    pub fn new() -> FountainResult<Self> {
        let substitutions = DEFAULT_SUBSTITUTIONS.clone()?;
        Ok(FountainParser { substitutions })
    }

    /// 使用指定的替换表，表不一致时返回结构错误
    pub fn with_table(table: &[Substitution]) -> Result<Self, StructuralParseError> {
        Ok(FountainParser {
            substitutions: Arc::from(compile(table)?),
        })
    }

    pub fn parse(&self, text: &str) -> FountainResult<ParseOutput> {
        let text = normalize(text);
        let title_page = parse_title_page_markup(&format!("{}\n\n", text));

        let tagged = self.tag(&text);
        let elements = self.extract_elements(&tagged)?;

        debug!(
            "标记解析完成: {} 个元素, {} 个标题页条目",
            elements.len(),
            title_page.len()
        );

        Ok(ParseOutput {
            elements,
            title_page,
        })
    }

    /// 生成带标签的中间文本
    pub fn tag(&self, text: &str) -> String {
        let body = markup_body(text);
        let body = mask_comment_newlines(&escape_markup(&body));
        apply_all(&body, &self.substitutions)
    }

    fn extract_elements(&self, tagged: &str) -> FountainResult<Vec<FountainElement>> {
        let types: Vec<&str> = MARKUP_REGEX["tag_type"]
            .captures_iter(tagged)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        let texts: Vec<&str> = MARKUP_REGEX["tag"]
            .captures_iter(tagged)
            .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
            .collect();

        if types.len() != texts.len() {
            return Err(StructuralParseError::MismatchedTextType {
                types: types.len(),
                texts: texts.len(),
            }
            .into());
        }

        let mut elements: Vec<FountainElement> = Vec::with_capacity(types.len());
        for (tag, raw) in types.iter().zip(texts.iter()) {
            let kind: ElementType = tag
                .parse()
                .map_err(StructuralParseError::UnknownElementType)?;
            if let Some(element) = self.post_process(kind, raw, &mut elements) {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    /// 单个元素的后处理，返回 None 表示丢弃
    fn post_process(
        &self,
        kind: ElementType,
        raw: &str,
        previous: &mut [FountainElement],
    ) -> Option<FountainElement> {
        let mut text = restore_markup(raw);
        let mut element = FountainElement::new(kind, "");

        if kind == ElementType::SceneHeading {
            if let Some(caps) = MARKUP_REGEX["scene_number"].captures(&text) {
                element.scene_number = caps.get(2).map(|m| m.as_str().to_string());
                text = text.replacen(&caps[1], "", 1);
            }
        }

        text = trim_newlines(&text).to_string();

        match kind {
            ElementType::Action if MARKUP_REGEX["centered"].is_match(&text) => {
                element.is_centered = true;
                if let Some(caps) = MARKUP_REGEX["centered_text"].captures(&text) {
                    text = caps[1].trim().to_string();
                }
            }
            ElementType::SceneHeading => {
                text = text.strip_prefix('.').unwrap_or(&text).trim().to_string();
            }
            ElementType::SectionHeading => {
                if let Some(caps) = MARKUP_REGEX["section"].captures(&text) {
                    element.section_depth = caps[1].len();
                    text = caps[2].to_string();
                }
            }
            ElementType::Transition => {
                if let Some(rest) = text.strip_prefix('>') {
                    text = rest.trim().to_string();
                }
            }
            ElementType::Comment => {
                text = text.trim().to_string();
            }
            ElementType::Dialogue if text.trim().is_empty() => return None,
            ElementType::Character if MARKUP_REGEX["dual_marker"].is_match(&text) => {
                element.is_dual_dialogue = true;
                text = MARKUP_REGEX["dual_marker"].replace(&text, "").to_string();
                mark_previous_dual(previous);
            }
            _ => {}
        }

        element.text = text;
        Some(element)
    }
}

/// 向前越过对白与括号注释，把最近的角色标记为双对白
fn mark_previous_dual(previous: &mut [FountainElement]) {
    for element in previous.iter_mut().rev() {
        match element.kind {
            ElementType::Dialogue | ElementType::Parenthetical => continue,
            ElementType::Character => {
                element.is_dual_dialogue = true;
                element.text = element.text.replace('^', "").trim_end().to_string();
                return;
            }
            _ => return,
        }
    }
}
