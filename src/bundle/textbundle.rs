use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::json;

use crate::bundle::{file_name_of, pick_content_name, ResolvedContent, FOUNTAIN_EXTENSION, TEXTBUNDLE_EXTENSION};
use crate::error::{FountainError, FountainResult};
use crate::models::FountainScript;

pub const RESOURCES_DIR: &str = "resources";
pub const CHARACTERS_JSON: &str = "characters.json";
pub const OUTLINE_JSON: &str = "outline.json";
pub const INFO_JSON: &str = "info.json";

/// 读取 TextBundle 目录中的内容文件
pub fn read_text_bundle(bundle: &Path) -> FountainResult<ResolvedContent> {
    let mut names = Vec::new();
    for entry in fs::read_dir(bundle)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    let name = match pick_content_name(names.iter().map(String::as_str)) {
        Some(name) => name.to_string(),
        None => {
            warn!("TextBundle 中没有内容文件: {}", bundle.display());
            return Err(FountainError::ContentNotFound(bundle.to_path_buf()));
        }
    };

    let path = bundle.join(&name);
    Ok(ResolvedContent {
        file_name: file_name_of(&path),
        text: fs::read_to_string(&path)?,
    })
}

/// 包内文件：相对路径与内容
pub(crate) fn bundle_entries(
    script: &FountainScript,
    name: &str,
    include_resources: bool,
) -> FountainResult<Vec<(String, String)>> {
    let info = json!({
        "version": 2,
        "type": "com.quote-unquote.fountain",
        "transient": false,
        "creatorIdentifier": env!("CARGO_PKG_NAME"),
    });

    let mut entries = vec![
        (format!("{}.{}", name, FOUNTAIN_EXTENSION), script.string_from_document()),
        (INFO_JSON.to_string(), serde_json::to_string_pretty(&info)?),
    ];
    if include_resources {
        entries.push((
            format!("{}/{}", RESOURCES_DIR, CHARACTERS_JSON),
            script.characters_json()?,
        ));
        entries.push((format!("{}/{}", RESOURCES_DIR, OUTLINE_JSON), script.outline_json()?));
    }
    Ok(entries)
}

/// 写出 `<name>.textbundle` 目录，返回目录路径
pub fn write_text_bundle(
    script: &FountainScript,
    destination: &Path,
    name: &str,
    include_resources: bool,
) -> FountainResult<PathBuf> {
    let bundle = destination.join(format!("{}.{}", name, TEXTBUNDLE_EXTENSION));
    fs::create_dir_all(&bundle)?;

    for (relative, contents) in bundle_entries(script, name, include_resources)? {
        let path = bundle.join(&relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
    }

    info!("TextBundle 已保存到: {}", bundle.display());
    Ok(bundle)
}
