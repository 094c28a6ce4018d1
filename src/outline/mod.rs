//! 大纲提取
//!
//! 把扁平的元素序列整理成带层级的大纲：
//! 标题(1) → 章节(2) → 场景指令(3) → 场景(4) → 笔记(5)。
//! 父子关系以 id 记录在扁平列表中，树视图由 [`OutlineTree`] 另行构建。

pub mod tree;

use log::warn;

use crate::models::outline_element::{OUTLINE_BLANK, OUTLINE_NOTE, OUTLINE_SCENE, OUTLINE_SECTION};
use crate::models::conf::DEFAULT_FALLBACK_TITLE;
use crate::models::{title_values, Conf, ElementType, FountainElement, FountainScript, OutlineElement};
use crate::utils::{file_stem, grapheme_len};

pub use tree::{OutlineTree, OutlineTreeNode, TreeNodeRef};

pub const SCENE_LEVEL: i32 = 4;
pub const NOTE_LEVEL: i32 = 5;
const NOTE_PREFIX: &str = "NOTE:";

/// 提取大纲，后备标题取文档记录的配置
pub fn extract_outline(script: &FountainScript) -> Vec<OutlineElement> {
    let fallback = script.fallback_title.as_deref().unwrap_or(DEFAULT_FALLBACK_TITLE);
    build_outline(script, fallback)
}

/// 提取大纲
///
/// # Arguments
///
/// * `script` - 已解析的剧本，不会被修改
/// * `conf` - 提供没有标题时使用的后备标题
pub fn extract_outline_with(script: &FountainScript, conf: &Conf) -> Vec<OutlineElement> {
    build_outline(script, &conf.fallback_title)
}

fn build_outline(script: &FountainScript, fallback: &str) -> Vec<OutlineElement> {
    let mut builder = OutlineBuilder::default();

    let top_level = script
        .elements
        .iter()
        .filter(|e| e.kind == ElementType::SectionHeading && e.section_depth == 1)
        .count();
    if top_level > 1 {
        warn!("发现 {} 个一级标题，只保留第一个，其余降为章节", top_level);
    }
    if top_level == 0 {
        builder.push_title(&synthesized_title(script, fallback));
    }

    let mut position = 0usize;
    let mut seen_top_level = false;

    for element in &script.elements {
        let length = approximate_length(element);
        match element.kind {
            ElementType::SectionHeading => {
                let mut level = element.section_depth as i32;
                if level == 1 {
                    if seen_top_level {
                        level = 2;
                    }
                    seen_top_level = true;
                }
                builder.push_section(element, level, position);
            }
            ElementType::SceneHeading => builder.push_scene(element, position),
            ElementType::Comment => {
                if let Some(note) = note_text(&element.text) {
                    builder.push_note(element, note, position);
                }
            }
            _ => {}
        }
        position += length;
    }

    builder.finish(position)
}

/// 没有一级标题时使用的标题：标题页 > 文件名 > 配置的后备标题
fn synthesized_title(script: &FountainScript, fallback: &str) -> String {
    if let Some(title) = title_values(&script.title_page, "title")
        .and_then(|values| values.iter().find(|v| !v.trim().is_empty()))
    {
        return title.trim().to_string();
    }
    match script.filename.as_deref() {
        Some(filename) if !filename.is_empty() => file_stem(filename),
        _ => fallback.to_string(),
    }
}

/// 估算元素在源文本中占用的长度
fn approximate_length(element: &FountainElement) -> usize {
    let text_len = grapheme_len(&element.text);
    match element.kind {
        ElementType::SectionHeading => element.section_depth + 1 + text_len + 2,
        ElementType::Comment => text_len + 6,
        _ => text_len + 2,
    }
}

/// `NOTE:` 开头（允许前导空格）的注释返回去掉前缀的文本
fn note_text(text: &str) -> Option<&str> {
    text.trim_start().strip_prefix(NOTE_PREFIX).map(str::trim)
}

#[derive(Default)]
struct OutlineBuilder {
    outline: Vec<OutlineElement>,
    /// 父节点栈，保存在 outline 中的下标
    stack: Vec<usize>,
}

impl OutlineBuilder {
    fn next(&self, level: i32, outline_type: &str) -> OutlineElement {
        OutlineElement::new(self.outline.len(), level, outline_type)
    }

    fn push_title(&mut self, title: &str) {
        let mut node = self.next(1, OUTLINE_SECTION);
        node.raw_string = format!("# {}", title);
        node.string = title.to_string();
        node.range = [0, grapheme_len(&node.raw_string)];
        self.attach(node);
    }

    fn push_section(&mut self, element: &FountainElement, level: i32, position: usize) {
        let mut node = self.next(level, OUTLINE_SECTION);
        let separator = if element.text.starts_with(' ') { "" } else { " " };
        node.raw_string = format!(
            "{}{}{}",
            "#".repeat(element.section_depth.max(1)),
            separator,
            element.text
        );
        node.string = element.text.trim().to_string();
        node.range = [position, grapheme_len(&node.raw_string)];

        if level == 2 {
            let first = node.string.to_uppercase();
            node.is_end_marker = first.split_whitespace().next() == Some("END");
        }
        if level == 3 {
            if let Some((name, description)) = scene_directive(&node.string) {
                node.scene_directive = Some(name.clone());
                node.scene_directive_description = Some(description);
                node.string = name;
            }
        }
        self.attach(node);
    }

    fn push_scene(&mut self, element: &FountainElement, position: usize) {
        let mut node = self.next(SCENE_LEVEL, OUTLINE_SCENE);
        node.raw_string = element.text.clone();
        node.string = element.text.trim().to_string();
        node.range = [position, grapheme_len(&node.raw_string)];
        self.attach(node);
    }

    fn push_note(&mut self, element: &FountainElement, note: &str, position: usize) {
        let mut node = self.next(NOTE_LEVEL, OUTLINE_NOTE);
        node.raw_string = format!("[[{}]]", element.text);
        node.string = note.to_string();
        node.range = [position, grapheme_len(&node.raw_string)];
        self.attach(node);
    }

    /// 维护父节点栈并建立双向链接
    fn attach(&mut self, mut node: OutlineElement) {
        while let Some(&top) = self.stack.last() {
            if self.outline[top].level >= node.level {
                self.stack.pop();
            } else {
                break;
            }
        }

        let index = self.outline.len();
        if !node.is_end_marker {
            if let Some(&top) = self.stack.last() {
                if self.outline[top].level == node.level - 1 {
                    node.parent_id = Some(self.outline[top].id.clone());
                    self.outline[top].child_ids.push(node.id.clone());
                }
            }
            self.stack.push(index);
        }
        self.outline.push(node);
    }

    fn finish(mut self, position: usize) -> Vec<OutlineElement> {
        if !self.outline.is_empty() {
            let mut blank = self.next(-1, OUTLINE_BLANK);
            blank.range = [position, 0];
            self.outline.push(blank);
        }
        self.outline
    }
}

/// `NAME: description` 拆成指令名与描述
fn scene_directive(text: &str) -> Option<(String, String)> {
    let (before, after) = text.split_once(':')?;
    let name = before.split_whitespace().next()?;
    Some((name.to_string(), after.trim().to_string()))
}
