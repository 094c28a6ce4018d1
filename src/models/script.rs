use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::bundle::{self, highland, textbundle};
use crate::characters;
use crate::error::{FountainError, FountainResult};
use crate::models::{CharacterList, Conf, FountainElement, OutlineElement, TitlePageEntry};
use crate::outline::{self, OutlineTree};
use crate::parser::ParserType;
use crate::utils::to_sorted_json;
use crate::writer;

/// 剧本文档
///
/// 解析完成后元素与标题页只由文档自身持有；大纲、角色统计与写回都只读访问。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FountainScript {
    pub filename: Option<String>,
    pub elements: Vec<FountainElement>,
    pub title_page: Vec<TitlePageEntry>,
    pub suppress_scene_numbers: bool,
    /// 大纲的后备标题，未设置时使用默认值
    #[serde(skip)]
    pub fallback_title: Option<String>,
    /// 文本来源，元素为空时可据此重新解析
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
    #[serde(skip)]
    pub parser: ParserType,
}

impl FountainScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从字符串解析
    pub fn from_string(text: &str, parser: ParserType) -> FountainResult<Self> {
        let mut script = Self::new();
        script.load_string(text, parser)?;
        Ok(script)
    }

    /// 从文件解析，支持 .fountain、.textbundle 与 .highland
    pub fn from_file(path: impl AsRef<Path>, parser: ParserType) -> FountainResult<Self> {
        let mut script = Self::new();
        script.load_file(path, parser)?;
        Ok(script)
    }

    /// 按配置读取文件
    pub fn from_file_with_conf(path: impl AsRef<Path>, conf: &Conf) -> FountainResult<Self> {
        let mut script = Self::from_file(path, conf.parser)?;
        script.apply_conf(conf);
        Ok(script)
    }

    /// 记录写回与导出相关的配置项
    pub fn apply_conf(&mut self, conf: &Conf) {
        self.suppress_scene_numbers = conf.suppress_scene_numbers;
        self.fallback_title = Some(conf.fallback_title.clone());
    }

    /// 解析文本并替换当前内容；解析失败时文档保持不变
    pub fn load_string(&mut self, text: &str, parser: ParserType) -> FountainResult<()> {
        let output = parser.parse(text)?;
        self.elements = output.elements;
        self.title_page = output.title_page;
        self.parser = parser;
        Ok(())
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>, parser: ParserType) -> FountainResult<()> {
        let path = path.as_ref();
        let content = bundle::read_content(path)?;
        self.load_string(&content.text, parser)?;
        self.filename = Some(content.file_name);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// 已解析的元素；为空时尝试从来源文件重新解析
    pub fn screenplay_elements(&mut self) -> FountainResult<&[FountainElement]> {
        if self.elements.is_empty() {
            let path = self.source_path.clone().ok_or(FountainError::EmptyDocument)?;
            let parser = self.parser;
            self.load_file(&path, parser)?;
        }
        Ok(&self.elements)
    }

    /// 标题页中的标题
    pub fn title(&self) -> Option<&str> {
        crate::models::title_values(&self.title_page, "title")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn string_from_document(&self) -> String {
        writer::document_string(self)
    }

    pub fn string_from_title_page(&self) -> String {
        writer::title_page_string(&self.title_page)
    }

    pub fn string_from_body(&self) -> String {
        writer::body_string(self)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> FountainResult<()> {
        let path = path.as_ref();
        fs::write(path, self.string_from_document())?;
        info!("剧本已保存到: {}", path.display());
        Ok(())
    }

    pub fn extract_outline(&self) -> Vec<OutlineElement> {
        outline::extract_outline(self)
    }

    pub fn extract_outline_with(&self, conf: &Conf) -> Vec<OutlineElement> {
        outline::extract_outline_with(self, conf)
    }

    pub fn extract_outline_tree(&self) -> OutlineTree {
        OutlineTree::build(&self.extract_outline())
    }

    pub fn extract_characters(&self) -> CharacterList {
        characters::extract_characters(self)
    }

    pub fn first_dialogue(&self, character: &str) -> Option<String> {
        characters::first_dialogue(self, character)
    }

    /// 大纲 JSON（格式化、键排序）
    pub fn outline_json(&self) -> FountainResult<String> {
        to_sorted_json(&self.extract_outline())
    }

    /// 角色统计 JSON（格式化、键排序）
    pub fn characters_json(&self) -> FountainResult<String> {
        to_sorted_json(&self.extract_characters())
    }

    pub fn write_outline_json(&self, path: impl AsRef<Path>) -> FountainResult<()> {
        fs::write(path, self.outline_json()?)?;
        Ok(())
    }

    pub fn write_characters_json(&self, path: impl AsRef<Path>) -> FountainResult<()> {
        fs::write(path, self.characters_json()?)?;
        Ok(())
    }

    /// 写出 TextBundle，返回包目录
    pub fn write_to_text_bundle(
        &self,
        destination: impl AsRef<Path>,
        name: &str,
        include_resources: bool,
    ) -> FountainResult<PathBuf> {
        textbundle::write_text_bundle(self, destination.as_ref(), name, include_resources)
    }

    /// 写出 Highland 文件，返回文件路径
    pub fn write_to_highland(
        &self,
        destination: impl AsRef<Path>,
        name: &str,
        include_resources: bool,
    ) -> FountainResult<PathBuf> {
        highland::write_highland(self, destination.as_ref(), name, include_resources)
    }
}
