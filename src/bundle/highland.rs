use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::bundle::textbundle::bundle_entries;
use crate::bundle::{pick_content_name, ResolvedContent, HIGHLAND_EXTENSION, TEXTBUNDLE_EXTENSION};
use crate::error::{FountainError, FountainResult};
use crate::models::FountainScript;

/// 压缩包内直接位于 `*.textbundle/` 目录下的文件，返回 (条目下标, 文件名)
fn bundle_files<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> FountainResult<Vec<(usize, String)>> {
    let mut files = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.name().ends_with('/') {
            continue;
        }
        let parts: Vec<&str> = entry.name().split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() < 2 {
            continue;
        }
        let parent = parts[parts.len() - 2];
        let suffix = format!(".{}", TEXTBUNDLE_EXTENSION);
        if parent.to_lowercase().ends_with(&suffix) {
            files.push((index, parts[parts.len() - 1].to_string()));
        }
    }
    Ok(files)
}

/// 读取 Highland 压缩包中的内容文件
pub fn read_highland(path: &Path) -> FountainResult<ResolvedContent> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let files = bundle_files(&mut archive)?;

    let chosen = pick_content_name(files.iter().map(|(_, name)| name.as_str()))
        .and_then(|name| files.iter().find(|(_, candidate)| candidate == name));
    let (index, file_name) = match chosen {
        Some(found) => found.clone(),
        None => {
            warn!("Highland 文件中没有内容文件: {}", path.display());
            return Err(FountainError::ContentNotFound(path.to_path_buf()));
        }
    };

    let mut text = String::new();
    archive.by_index(index)?.read_to_string(&mut text)?;
    Ok(ResolvedContent { file_name, text })
}

/// 写出 `<name>.highland`：内含 `<name>.textbundle/` 目录
pub fn write_highland(
    script: &FountainScript,
    destination: &Path,
    name: &str,
    include_resources: bool,
) -> FountainResult<PathBuf> {
    std::fs::create_dir_all(destination)?;
    let path = destination.join(format!("{}.{}", name, HIGHLAND_EXTENSION));
    let root = format!("{}.{}/", name, TEXTBUNDLE_EXTENSION);

    let mut zip = ZipWriter::new(File::create(&path)?);
    zip.add_directory(root.as_str(), FileOptions::default())?;

    let mut directories: Vec<String> = Vec::new();
    for (relative, contents) in bundle_entries(script, name, include_resources)? {
        if let Some((dir, _)) = relative.rsplit_once('/') {
            let dir = format!("{}{}/", root, dir);
            if !directories.contains(&dir) {
                zip.add_directory(dir.as_str(), FileOptions::default())?;
                directories.push(dir);
            }
        }
        zip.start_file(format!("{}{}", root, relative), FileOptions::default())?;
        zip.write_all(contents.as_bytes())?;
    }
    zip.finish()?;

    info!("Highland 文件已保存到: {}", path.display());
    Ok(path)
}
