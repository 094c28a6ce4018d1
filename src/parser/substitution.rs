//! 标记解析器的有序替换表
//!
//! 每一项把一种结构写法替换成显式的 `<类型>...</类型>` 标签。
//! 表项顺序即执行顺序：更具体的规则（场景标题、角色与对白配对）必须先于
//! 兜底的动作规则执行，调整顺序会改变解析结果。
//!
//! `regex` 不支持环视，需要环视的表项通过 [`Guard`] 在匹配后再做判断。

use regex::{Captures, Regex};

use crate::error::StructuralParseError;

/// 匹配后的附加条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    None,
    /// 匹配起点之前的文本必须以其中之一结尾（相当于后顾）
    Preceded(&'static [&'static str]),
    /// 匹配结束处不能紧跟换行（相当于否定前瞻）
    NotFollowedByNewline,
    /// 最后一个捕获组取最短长度，且其后必须紧跟其中之一（相当于惰性匹配加前瞻），
    /// 前瞻部分不被消费
    Until(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Substitution {
    pub name: &'static str,
    pub pattern: &'static str,
    pub template: &'static str,
    pub guard: Guard,
}

const fn rule(name: &'static str, pattern: &'static str, template: &'static str) -> Substitution {
    Substitution {
        name,
        pattern,
        template,
        guard: Guard::None,
    }
}

const fn guarded(
    name: &'static str,
    pattern: &'static str,
    template: &'static str,
    guard: Guard,
) -> Substitution {
    Substitution {
        name,
        pattern,
        template,
        guard,
    }
}

pub static SUBSTITUTIONS: &[Substitution] = &[
    rule("line_breaks", r"\r\n|\r|\n", "\n"),
    rule("boneyard", r"\n/\*([^<>]+?)\*/\n", "\n<Boneyard>$1</Boneyard>\n"),
    rule("comment", r"\n\[\[([^<>]+?)\]\]\n", "\n<Comment>$1</Comment>\n"),
    rule("synopsis", r"\n=([^<>=][^<>]+?)\n", "\n<Synopsis>$1</Synopsis>\n"),
    rule(
        "page_break",
        r"(?m)^(\s*[=\-_]{3,8}[ \t]*)\n",
        "\n<Page Break></Page Break>\n",
    ),
    rule(
        "centered",
        r"\n((?:&gt;|>)[ \t]*[^<>\n]+(?:&lt;[ \t]*))\n",
        "\n<Action>$1</Action>",
    ),
    rule(
        "forced_transition",
        r"\n((?:&gt;|>)[ \t]*[^<>\n]+)\n",
        "\n<Transition>$1</Transition>",
    ),
    rule(
        "scene_heading",
        r"(?m)^((?i:(?:i|int)\.?/(?:e|ext)\.?|int|ext|est)[. \t\-][^\n]*|\.[^.\n][^\n]*)\n",
        "\n<Scene Heading>$1</Scene Heading>",
    ),
    rule("first_line_action", r"^\n\n([^<>\n#]+)\n\n", "<Action>$1</Action>\n\n"),
    rule(
        "transition",
        r"\n([*_]*(?:[^<>\na-z]*TO:|FADE TO BLACK\.|FADE OUT\.|CUT TO BLACK\.)[*_]*)\n",
        "\n<Transition>$1</Transition>",
    ),
    guarded(
        "character",
        r"(?m)^([ \t]*[^<>a-z\s/#][^<>a-z:!?\n]*[^<>a-z(!?:,\n.][ \t]?)\n",
        "<Character>$1</Character>",
        Guard::NotFollowedByNewline,
    ),
    guarded(
        "parenthetical",
        r"(\([^<>]*?\)[ \t]?)\n",
        "<Parenthetical>$1</Parenthetical>",
        Guard::Preceded(&["\n", "</Character>"]),
    ),
    guarded(
        "dialogue",
        r"(<(?:Character|Parenthetical)>[^<>\n]+</(?:Character|Parenthetical)>)([^<>]*)",
        "$1<Dialogue>$2</Dialogue>",
        Guard::Until(&["\n\n", "\n<Parenthetical>", "\n<Transition>"]),
    ),
    guarded(
        "section_heading",
        r"((#+)([^\n]*))\n?",
        "<Section Heading>$1</Section Heading>",
        Guard::Preceded(&["\n"]),
    ),
    rule("action", r"([^<>]*?)(\n{2}|\n<)", "<Action>$1</Action>$2"),
    rule("empty_action", r"<Action>\s*</Action>", ""),
    rule("newline_sentinel", "@@@@@", "\n"),
];

/// 编译后的表项
#[derive(Debug, Clone)]
pub struct CompiledSubstitution {
    pub rule: Substitution,
    regex: Regex,
}

/// 编译替换表，并检查每个模板引用的捕获组都存在
pub fn compile(table: &[Substitution]) -> Result<Vec<CompiledSubstitution>, StructuralParseError> {
    table
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let regex = Regex::new(rule.pattern)
                .map_err(|source| StructuralParseError::InvalidPattern { index, source })?;
            let available = regex.captures_len() - 1;
            if let Some(group) = template_groups(rule.template)
                .into_iter()
                .find(|&group| group > available)
            {
                return Err(StructuralParseError::MismatchedPatternTemplate {
                    index,
                    group,
                    available,
                });
            }
            if let Guard::Until(_) = rule.guard {
                if available == 0 {
                    return Err(StructuralParseError::MismatchedPatternTemplate {
                        index,
                        group: 1,
                        available,
                    });
                }
            }
            Ok(CompiledSubstitution { rule: *rule, regex })
        })
        .collect()
}

/// 模板中 `$N` 引用的组号
fn template_groups(template: &str) -> Vec<usize> {
    let mut groups = Vec::new();
    let mut chars = template.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            continue;
        }
        let mut digits = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if let Ok(group) = digits.parse() {
            groups.push(group);
        }
    }
    groups
}

fn next_boundary(text: &str, index: usize) -> usize {
    index + text[index..].chars().next().map_or(1, |c| c.len_utf8())
}

impl CompiledSubstitution {
    /// 对整段文本执行一次全局替换
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let caps = match self.regex.captures_at(text, pos) {
                Some(caps) => caps,
                None => break,
            };
            let (start, end) = match caps.get(0) {
                Some(m) => (m.start(), m.end()),
                None => break,
            };

            let accepted = match self.rule.guard {
                Guard::None => Some(end),
                Guard::Preceded(prefixes) => {
                    let before = &text[..start];
                    if start == 0 || prefixes.iter().any(|p| before.ends_with(p)) {
                        Some(end)
                    } else {
                        None
                    }
                }
                Guard::NotFollowedByNewline => {
                    if text[end..].starts_with('\n') {
                        None
                    } else {
                        Some(end)
                    }
                }
                Guard::Until(stops) => self.shortest_until(text, &caps, stops),
            };

            let end = match accepted {
                Some(end) => end,
                None => {
                    pos = next_boundary(text, start);
                    continue;
                }
            };

            out.push_str(&text[last..start]);
            match self.rule.guard {
                Guard::Until(_) => {
                    // 在截断的文本上重新匹配，使模板中的组取到最短内容
                    if let Some(short) = self.regex.captures_at(&text[..end], start) {
                        short.expand(self.rule.template, &mut out);
                    }
                }
                _ => caps.expand(self.rule.template, &mut out),
            }
            last = end;
            pos = if end > start { end } else { next_boundary(text, end) };
        }

        if last < text.len() {
            out.push_str(&text[last..]);
        }
        out
    }

    /// 最后一个捕获组中第一个其后紧跟终止串的位置
    fn shortest_until(&self, text: &str, caps: &Captures, stops: &[&str]) -> Option<usize> {
        let body = caps.get(caps.len() - 1)?;
        (body.start()..=body.end())
            .filter(|&i| text.is_char_boundary(i))
            .find(|&i| stops.iter().any(|stop| text[i..].starts_with(stop)))
    }
}

/// 按顺序执行整张替换表
pub fn apply_all(text: &str, table: &[CompiledSubstitution]) -> String {
    table
        .iter()
        .fold(text.to_string(), |current, substitution| substitution.apply(&current))
}
