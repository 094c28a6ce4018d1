use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 角色台词统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCounts {
    pub line_count: usize,
    pub word_count: usize,
}

/// 角色性别，目前只有未指定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacterGender {
    Unspecified {},
}

impl Default for CharacterGender {
    fn default() -> Self {
        CharacterGender::Unspecified {}
    }
}

/// 单个角色的统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    /// 未设置时不输出该键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub counts: CharacterCounts,
    pub gender: CharacterGender,
    /// 出现过的场景序号，按首次出现顺序且不重复
    pub scenes: Vec<usize>,
}

impl CharacterInfo {
    pub fn line_count(&self) -> usize {
        self.counts.line_count
    }

    pub fn word_count(&self) -> usize {
        self.counts.word_count
    }

    pub(crate) fn add_scene(&mut self, scene: usize) {
        if !self.scenes.contains(&scene) {
            self.scenes.push(scene);
        }
    }
}

/// 角色名到统计信息的映射，按名字排序
pub type CharacterList = BTreeMap<String, CharacterInfo>;
