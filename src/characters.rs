//! 角色台词统计

use crate::models::{CharacterInfo, CharacterList, ElementType, FountainScript};
use crate::utils::count_words;

/// 角色名归一化：去掉扩展（如 `(V.O.)`）、双对白标记和强制标记，转为大写
pub fn normalize_character_name(name: &str) -> String {
    let name = name.trim();
    let name = name.split('(').next().unwrap_or(name);
    let name = name.replace('^', "");
    let name = name.trim();
    name.strip_prefix('@').unwrap_or(name).trim().to_uppercase()
}

/// 统计每个角色的台词次数、词数和出现的场景
pub fn extract_characters(script: &FountainScript) -> CharacterList {
    let mut characters = CharacterList::new();
    let mut scene_index: Option<usize> = None;
    let mut current: Option<String> = None;

    for element in &script.elements {
        match element.kind {
            ElementType::SceneHeading => {
                scene_index = Some(scene_index.map_or(0, |index| index + 1));
            }
            ElementType::Character => {
                let name = normalize_character_name(&element.text);
                let info = characters.entry(name.clone()).or_insert_with(CharacterInfo::default);
                if let Some(scene) = scene_index {
                    info.add_scene(scene);
                }
                info.counts.line_count += 1;
                current = Some(name);
            }
            ElementType::Dialogue | ElementType::Parenthetical => {
                if let Some(info) = current.as_ref().and_then(|name| characters.get_mut(name)) {
                    info.counts.word_count += count_words(&element.text);
                }
            }
            _ => {}
        }
    }

    characters
}

/// 角色第一句对白
///
/// 只认紧跟在该角色提示行之后的对白（中间可以隔着括号注释）
pub fn first_dialogue(script: &FountainScript, character: &str) -> Option<String> {
    let wanted = normalize_character_name(character);
    let mut speaking = false;

    for element in &script.elements {
        match element.kind {
            ElementType::Character => {
                speaking = normalize_character_name(&element.text) == wanted;
            }
            ElementType::Parenthetical => {}
            ElementType::Dialogue if speaking => return Some(element.text.clone()),
            _ => speaking = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_character_name() {
        assert_eq!(normalize_character_name("bob (V.O.)"), "BOB");
        assert_eq!(normalize_character_name("ALICE ^"), "ALICE");
        assert_eq!(normalize_character_name("@McCLANE"), "MCCLANE");
        assert_eq!(normalize_character_name("  HANS (CONT'D) "), "HANS");
    }
}
