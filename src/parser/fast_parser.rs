use log::debug;

use crate::models::{ElementType, FountainElement};
use crate::parser::title_page::{normalize, parse_title_block};
use crate::parser::ParseOutput;
use crate::utils::fountain_constants::{split_scene_number, FountainConstants, LINE_REGEX};

/// 单遍逐行解析器
///
/// 每一行按固定优先级依次尝试各条规则，第一条命中的规则生效。
/// 规则顺序决定了歧义写法的归属，不能随意调整。
pub struct FastFountainParser {
    elements: Vec<FountainElement>,
    /// 连续空行数
    newlines_before: usize,
    is_comment_block: bool,
    is_inside_dialogue_block: bool,
    comment_text: String,
}

impl Default for FastFountainParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FastFountainParser {
    pub fn new() -> Self {
        FastFountainParser {
            elements: Vec::new(),
            newlines_before: 0,
            is_comment_block: false,
            is_inside_dialogue_block: false,
            comment_text: String::new(),
        }
    }

    /// 解析 Fountain 文本
    ///
    /// 该过程不会失败：无法识别的行最终归为 Action
    pub fn parse(mut self, text: &str) -> ParseOutput {
        let mut contents = normalize(text);
        contents.push_str("\n\n");

        let (title_page, consumed) = parse_title_block(&contents);
        let body = format!("\n{}", &contents[consumed..]);
        let lines: Vec<&str> = body.split('\n').collect();

        for (index, line) in lines.iter().enumerate() {
            let next_line = lines.get(index + 1).copied();
            self.parse_line(line, next_line);
        }

        debug!(
            "快速解析完成: {} 个元素, {} 个标题页条目",
            self.elements.len(),
            title_page.len()
        );

        ParseOutput {
            elements: self.elements,
            title_page,
        }
    }

    fn push(&mut self, element: FountainElement) {
        self.elements.push(element);
        self.newlines_before = 0;
    }

    fn last_is(&self, kind: ElementType) -> bool {
        self.elements.last().map_or(false, |e| e.kind == kind)
    }

    /// 追加到上一个对白，没有则新建
    fn push_dialogue_line(&mut self, line: &str) {
        if self.last_is(ElementType::Dialogue) {
            if let Some(last) = self.elements.last_mut() {
                last.text.push('\n');
                last.text.push_str(line);
            }
            self.newlines_before = 0;
        } else {
            self.push(FountainElement::new(ElementType::Dialogue, line));
        }
    }

    fn parse_line(&mut self, line: &str, next_line: Option<&str>) {
        // 歌词
        if line.starts_with('~') {
            if self.last_is(ElementType::Lyrics) && self.newlines_before > 0 {
                self.elements.push(FountainElement::new(ElementType::Lyrics, " "));
            }
            self.push(FountainElement::new(ElementType::Lyrics, line));
            return;
        }

        // 强制动作
        if line.starts_with('!') {
            self.push(FountainElement::new(ElementType::Action, line));
            return;
        }

        // 强制角色
        if line.starts_with('@') {
            self.push(FountainElement::new(ElementType::Character, line));
            self.is_inside_dialogue_block = true;
            return;
        }

        // 对白中的空行：两个空格
        if self.is_inside_dialogue_block && LINE_REGEX["two_spaces"].is_match(line) {
            self.push_dialogue_line(line);
            return;
        }

        if LINE_REGEX["whitespace_only"].is_match(line) {
            self.push(FountainElement::new(ElementType::Action, line));
            return;
        }

        if line.is_empty() && !self.is_comment_block {
            self.is_inside_dialogue_block = false;
            self.newlines_before += 1;
            return;
        }

        if self.parse_boneyard(line) {
            return;
        }

        if LINE_REGEX["page_break"].is_match(line) {
            self.push(FountainElement::new(ElementType::PageBreak, line));
            return;
        }

        let trimmed = line.trim();

        // 概要
        if trimmed.starts_with('=') {
            if let Some(marker) = LINE_REGEX["synopsis"].find(line) {
                self.push(FountainElement::new(ElementType::Synopsis, &line[marker.end()..]));
                return;
            }
        }

        // 注释 [[...]]
        if self.newlines_before > 0 && LINE_REGEX["comment"].is_match(line) {
            let text = line.replace("[[", "").replace("]]", "");
            self.push(FountainElement::new(ElementType::Comment, text.trim()));
            return;
        }

        // 章节标题，标记后没有文本时继续尝试后面的规则
        if trimmed.starts_with('#') {
            if let Some(caps) = LINE_REGEX["section"].captures(line) {
                let depth = caps[1].len();
                let text = &line[caps.get(0).map_or(0, |m| m.end())..];
                if !text.trim().is_empty() {
                    self.push(FountainElement::section(depth, text));
                    return;
                }
            }
        }

        // 强制场景标题：以单个 . 开头
        let mut chars = line.chars();
        if chars.next() == Some('.') && matches!(chars.next(), Some(c) if c != '.') {
            let (text, number) = split_scene_number(line);
            let text = text[1..].trim().to_string();
            self.push(FountainElement::scene_heading(text, number));
            return;
        }

        if self.newlines_before > 0 && LINE_REGEX["scene_heading"].is_match(line) {
            let (text, number) = split_scene_number(line);
            self.push(FountainElement::scene_heading(text.trim_end(), number));
            return;
        }

        // 转场
        if LINE_REGEX["transition"].is_match(line)
            || FountainConstants::TRANSITIONS.contains(&line.trim_start())
        {
            self.push(FountainElement::new(ElementType::Transition, line));
            return;
        }

        // 强制转场与居中文本
        if let Some(rest) = line.strip_prefix('>') {
            if line.chars().count() > 1 && line.ends_with('<') {
                let text = rest.trim();
                let text = text.strip_suffix('<').unwrap_or(text).trim();
                self.push(FountainElement::centered(text));
            } else {
                self.push(FountainElement::new(ElementType::Transition, rest.trim()));
            }
            return;
        }

        // 角色：下一行必须非空
        if self.newlines_before > 0
            && LINE_REGEX["character"].is_match(line)
            && next_line.map_or(false, |next| !next.is_empty())
        {
            let mut element = FountainElement::new(ElementType::Character, line);
            if LINE_REGEX["dual_marker"].is_match(line) {
                element.is_dual_dialogue = true;
                element.text = LINE_REGEX["dual_marker"].replace(line, "").to_string();
                if let Some(previous) = self
                    .elements
                    .iter_mut()
                    .rev()
                    .find(|e| e.kind == ElementType::Character)
                {
                    previous.is_dual_dialogue = true;
                }
            }
            self.push(element);
            self.is_inside_dialogue_block = true;
            return;
        }

        // 对白与括号注释
        if self.is_inside_dialogue_block {
            if self.newlines_before == 0 && LINE_REGEX["parenthetical"].is_match(line) {
                self.push(FountainElement::new(ElementType::Parenthetical, line));
            } else {
                self.push_dialogue_line(line);
            }
            return;
        }

        // 没有空行分隔时并入上一个元素；场景标题必须前后有空行，降级为动作
        if self.newlines_before == 0 {
            if let Some(previous) = self.elements.last_mut() {
                if previous.kind == ElementType::SceneHeading {
                    previous.kind = ElementType::Action;
                    previous.scene_number = None;
                }
                previous.text.push('\n');
                previous.text.push_str(line);
                return;
            }
        }

        self.push(FountainElement::new(ElementType::Action, line));
    }

    /// 处理 /* ... */ 注释块，返回该行是否已被消费
    fn parse_boneyard(&mut self, line: &str) -> bool {
        if LINE_REGEX["boneyard_open"].is_match(line) {
            if LINE_REGEX["boneyard_close"].is_match(line) {
                let text = line.replace("/*", "").replace("*/", "");
                self.is_comment_block = false;
                self.push(FountainElement::new(ElementType::Boneyard, text));
            } else {
                self.is_comment_block = true;
                self.comment_text.push('\n');
            }
            return true;
        }

        if !self.is_comment_block {
            return false;
        }

        if LINE_REGEX["boneyard_close"].is_match(line) {
            let text = line.replace("*/", "");
            if !text.trim().is_empty() {
                self.comment_text.push_str(text.trim());
            }
            self.is_comment_block = false;
            let text = std::mem::take(&mut self.comment_text);
            self.push(FountainElement::new(ElementType::Boneyard, text));
        } else {
            self.comment_text.push_str(line);
            self.comment_text.push('\n');
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(output: &ParseOutput) -> Vec<ElementType> {
        output.elements.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_fallback_merge() {
        let output = FastFountainParser::new().parse("Line A\nLine B");
        assert_eq!(kinds(&output), vec![ElementType::Action]);
        assert_eq!(output.elements[0].text, "Line A\nLine B");
    }

    #[test]
    fn test_scene_heading_needs_blank_after() {
        let output = FastFountainParser::new().parse("INT. ROOM - DAY\nHe waits.");
        assert_eq!(kinds(&output), vec![ElementType::Action]);
        assert_eq!(output.elements[0].text, "INT. ROOM - DAY\nHe waits.");
    }

    #[test]
    fn test_boneyard_block() {
        let output = FastFountainParser::new().parse("/*\nhidden line\n*/\n\nAction.");
        assert_eq!(kinds(&output), vec![ElementType::Boneyard, ElementType::Action]);
        assert_eq!(output.elements[0].text, "\nhidden line\n");
    }

    #[test]
    fn test_empty_section_falls_through() {
        let output = FastFountainParser::new().parse("#\n\nAction.");
        assert!(output.elements.iter().all(|e| e.kind != ElementType::SectionHeading));
    }
}
