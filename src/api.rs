//! 对外 API
//!
//! 供外部应用调用的异步接口。解析本身是同步的 CPU 计算，放到阻塞线程池中执行。

use log::warn;

use crate::error::{FountainError, FountainResult};
use crate::models::{Conf, FountainScript};
use crate::parser::ParserType;

/// 简化的配置结构，用于外部调用
#[derive(Debug, Clone)]
pub struct SimpleConf {
    /// "fast" 或 "markup"
    pub parser: String,
    pub suppress_scene_numbers: bool,
    pub include_resources: bool,
}

impl Default for SimpleConf {
    fn default() -> Self {
        Self {
            parser: "fast".to_string(),
            suppress_scene_numbers: false,
            include_resources: true,
        }
    }
}

impl From<SimpleConf> for Conf {
    fn from(simple: SimpleConf) -> Self {
        let mut conf = Conf::default();
        conf.parser = match simple.parser.to_lowercase().as_str() {
            "markup" | "regex" => ParserType::Markup,
            _ => ParserType::Fast,
        };
        conf.suppress_scene_numbers = simple.suppress_scene_numbers;
        conf.include_resources = simple.include_resources;
        conf
    }
}

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub success: bool,
    pub message: String,
    pub file_path: Option<String>,
}

impl ExportResult {
    fn from_result(result: FountainResult<String>, success_message: &str) -> Self {
        match result {
            Ok(path) => ExportResult {
                success: true,
                message: success_message.to_string(),
                file_path: Some(path),
            },
            Err(e) => {
                warn!("导出失败: {}", e);
                ExportResult {
                    success: false,
                    message: format!("导出失败: {}", e),
                    file_path: None,
                }
            }
        }
    }
}

async fn parse_in_background(text: String, conf: Conf) -> FountainResult<FountainScript> {
    tokio::task::spawn_blocking(move || crate::parse(&text, &conf))
        .await
        .map_err(|e| {
            warn!("解析任务异常结束: {}", e);
            FountainError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
        })?
}

/// 解析结果转为 JSON，失败时记录错误并返回 "{}"
fn script_json(result: FountainResult<FountainScript>) -> String {
    let json = result.and_then(|script| Ok(serde_json::to_string(&script)?));
    match json {
        Ok(json) => json,
        Err(e) => {
            warn!("解析失败，返回空文档: {}", e);
            "{}".to_string()
        }
    }
}

/// 解析Fountain文本，返回文档的 JSON
pub async fn parse_fountain_text(text: String, config: Option<SimpleConf>) -> String {
    let conf = config.unwrap_or_default().into();
    script_json(parse_in_background(text, conf).await)
}

/// 导出大纲 JSON
pub async fn export_outline_json(text: String, output_path: String, config: Option<SimpleConf>) -> ExportResult {
    let conf: Conf = config.unwrap_or_default().into();
    let result = async {
        let script = parse_in_background(text, conf.clone()).await?;
        let json = crate::utils::to_sorted_json(&script.extract_outline_with(&conf))?;
        tokio::fs::write(&output_path, json).await?;
        Ok::<_, FountainError>(output_path.clone())
    }
    .await;
    ExportResult::from_result(result, "大纲导出成功")
}

/// 导出角色统计 JSON
pub async fn export_characters_json(text: String, output_path: String, config: Option<SimpleConf>) -> ExportResult {
    let conf: Conf = config.unwrap_or_default().into();
    let result = async {
        let script = parse_in_background(text, conf).await?;
        tokio::fs::write(&output_path, script.characters_json()?).await?;
        Ok::<_, FountainError>(output_path.clone())
    }
    .await;
    ExportResult::from_result(result, "角色统计导出成功")
}

/// 导出 TextBundle
pub async fn export_to_text_bundle(
    text: String,
    output_dir: String,
    name: String,
    config: Option<SimpleConf>,
) -> ExportResult {
    let conf: Conf = config.unwrap_or_default().into();
    let result = async {
        let include_resources = conf.include_resources;
        let script = parse_in_background(text, conf).await?;
        let path = script.write_to_text_bundle(&output_dir, &name, include_resources)?;
        Ok::<_, FountainError>(path.display().to_string())
    }
    .await;
    ExportResult::from_result(result, "TextBundle导出成功")
}

/// 导出 Highland 文件
pub async fn export_to_highland(
    text: String,
    output_dir: String,
    name: String,
    config: Option<SimpleConf>,
) -> ExportResult {
    let conf: Conf = config.unwrap_or_default().into();
    let result = async {
        let include_resources = conf.include_resources;
        let script = parse_in_background(text, conf).await?;
        let path = script.write_to_highland(&output_dir, &name, include_resources)?;
        Ok::<_, FountainError>(path.display().to_string())
    }
    .await;
    ExportResult::from_result(result, "Highland导出成功")
}

/// 测试函数
pub fn test_connection() -> String {
    "Rust bridge connection successful!".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_parse_falls_back_to_empty_object() {
        assert_eq!(script_json(Err(FountainError::EmptyDocument)), "{}");

        let script = crate::parse("INT. ROOM - DAY", &Conf::default()).unwrap();
        let json = script_json(Ok(script));
        assert!(json.contains("Scene Heading"));
    }

    #[test]
    fn test_failed_export_is_reported() {
        let result = ExportResult::from_result(Err(FountainError::EmptyDocument), "成功");
        assert!(!result.success);
        assert!(result.file_path.is_none());
        assert!(result.message.starts_with("导出失败"));
    }
}
