use serde::{Deserialize, Serialize};

/// 大纲节点类型标签
pub const OUTLINE_SECTION: &str = "sectionHeader";
pub const OUTLINE_SCENE: &str = "sceneHeader";
pub const OUTLINE_NOTE: &str = "note";
pub const OUTLINE_BLANK: &str = "blank";

/// 大纲中的一个节点
///
/// 父子关系通过 id 表达，不持有引用，整个列表可以直接序列化和克隆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineElement {
    pub id: String,
    pub index: usize,
    pub is_collapsed: bool,
    /// 结构层级，终止空白节点为 -1
    pub level: i32,
    /// [起始位置, 长度]，按元素类型估算，不是精确偏移
    pub range: [usize; 2],
    pub raw_string: String,
    pub string: String,
    #[serde(rename = "type")]
    pub outline_type: String,
    pub scene_directive: Option<String>,
    pub scene_directive_description: Option<String>,
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
    pub is_end_marker: bool,
}

impl OutlineElement {
    pub fn new(index: usize, level: i32, outline_type: &str) -> Self {
        OutlineElement {
            id: format!("/{}", index),
            index,
            is_collapsed: false,
            level,
            range: [0, 0],
            raw_string: String::new(),
            string: String::new(),
            outline_type: outline_type.to_string(),
            scene_directive: None,
            scene_directive_description: None,
            parent_id: None,
            child_ids: Vec::new(),
            is_end_marker: false,
        }
    }

    pub fn element_type(&self) -> &'static str {
        "outline"
    }

    pub fn is_main_title(&self) -> bool {
        self.level == 1 && self.outline_type == OUTLINE_SECTION
    }

    pub fn is_chapter(&self) -> bool {
        self.level == 2 && self.outline_type == OUTLINE_SECTION
    }

    pub fn is_scene_directive(&self) -> bool {
        self.scene_directive.is_some()
    }

    /// 在大纲列表中查找父节点
    pub fn parent<'a>(&self, outline: &'a [OutlineElement]) -> Option<&'a OutlineElement> {
        let parent_id = self.parent_id.as_ref()?;
        outline.iter().find(|element| &element.id == parent_id)
    }

    /// 在大纲列表中按 child_ids 顺序查找子节点
    pub fn children<'a>(&self, outline: &'a [OutlineElement]) -> Vec<&'a OutlineElement> {
        self.child_ids
            .iter()
            .filter_map(|id| outline.iter().find(|element| &element.id == id))
            .collect()
    }
}
