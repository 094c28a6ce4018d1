pub mod error;
pub mod models;
pub mod utils;
pub mod parser;
pub mod writer;
pub mod outline;
pub mod characters;
pub mod bundle;
pub mod api;

pub use error::{FountainError, FountainResult, StructuralParseError};

pub use models::{
    CharacterInfo,
    CharacterList,
    Conf,
    ElementType,
    FountainElement,
    FountainScript,
    OutlineElement,
    TitlePageEntry,
};

pub use parser::{
    FastFountainParser,
    FountainParser,
    ParseOutput,
    ParserType,
};

pub use outline::{extract_outline, OutlineTree, TreeNodeRef};
pub use characters::{extract_characters, first_dialogue};
pub use bundle::{get_content, read_content, DocumentFormat};

pub use api::{
    SimpleConf,
    ExportResult,
    parse_fountain_text,
    export_outline_json,
    export_characters_json,
    export_to_text_bundle,
    export_to_highland,
    test_connection,
};

/// 解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
/// * `config` - 配置对象，决定解析策略与场景编号是否省略
///
/// # Returns
///
/// 解析后的剧本文档
pub fn parse(script: &str, config: &Conf) -> FountainResult<FountainScript> {
    let mut document = FountainScript::from_string(script, config.parser)?;
    document.apply_conf(config);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let config = Conf::default();
        let result = parse("INT. ROOM - DAY\n\nHello, world!", &config).unwrap();
        assert_eq!(result.elements.len(), 2);
        assert_eq!(result.elements[0].kind, ElementType::SceneHeading);
    }
}
