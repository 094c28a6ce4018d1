use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 剧本元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "Section Heading")]
    SectionHeading,
    #[serde(rename = "Scene Heading")]
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Lyrics,
    Transition,
    #[serde(rename = "Page Break")]
    PageBreak,
    Synopsis,
    Comment,
    Boneyard,
}

impl ElementType {
    /// 标签及序列化使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::SectionHeading => "Section Heading",
            ElementType::SceneHeading => "Scene Heading",
            ElementType::Action => "Action",
            ElementType::Character => "Character",
            ElementType::Dialogue => "Dialogue",
            ElementType::Parenthetical => "Parenthetical",
            ElementType::Lyrics => "Lyrics",
            ElementType::Transition => "Transition",
            ElementType::PageBreak => "Page Break",
            ElementType::Synopsis => "Synopsis",
            ElementType::Comment => "Comment",
            ElementType::Boneyard => "Boneyard",
        }
    }

    /// 对白块内的元素（写回时不额外包裹空行）
    pub fn is_dialogue_part(&self) -> bool {
        matches!(
            self,
            ElementType::Dialogue | ElementType::Parenthetical | ElementType::Comment
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "Section Heading" => ElementType::SectionHeading,
            "Scene Heading" => ElementType::SceneHeading,
            "Action" => ElementType::Action,
            "Character" => ElementType::Character,
            "Dialogue" => ElementType::Dialogue,
            "Parenthetical" => ElementType::Parenthetical,
            "Lyrics" => ElementType::Lyrics,
            "Transition" => ElementType::Transition,
            "Page Break" => ElementType::PageBreak,
            "Synopsis" => ElementType::Synopsis,
            "Comment" => ElementType::Comment,
            "Boneyard" => ElementType::Boneyard,
            other => return Err(other.to_string()),
        };
        Ok(kind)
    }
}

/// 剧本中的一个结构单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FountainElement {
    pub kind: ElementType,
    pub text: String,
    pub is_centered: bool,
    /// 仅对 Character 有意义
    pub is_dual_dialogue: bool,
    /// 仅对 SceneHeading 有意义
    pub scene_number: Option<String>,
    /// 仅对 SectionHeading 有意义，1 为最顶层
    pub section_depth: usize,
}

impl FountainElement {
    pub fn new(kind: ElementType, text: impl Into<String>) -> Self {
        FountainElement {
            kind,
            text: text.into(),
            is_centered: false,
            is_dual_dialogue: false,
            scene_number: None,
            section_depth: 0,
        }
    }

    pub fn section(depth: usize, text: impl Into<String>) -> Self {
        let mut element = Self::new(ElementType::SectionHeading, text);
        element.section_depth = depth;
        element
    }

    pub fn scene_heading(text: impl Into<String>, scene_number: Option<String>) -> Self {
        let mut element = Self::new(ElementType::SceneHeading, text);
        element.scene_number = scene_number;
        element
    }

    pub fn centered(text: impl Into<String>) -> Self {
        let mut element = Self::new(ElementType::Action, text);
        element.is_centered = true;
        element
    }

    pub fn is(&self, kind: ElementType) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for FountainElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.text)
    }
}
