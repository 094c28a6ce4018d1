use fountain_script::{
    export_characters_json, export_outline_json, export_to_highland, export_to_text_bundle,
    parse_fountain_text, test_connection, SimpleConf,
};
use std::path::Path;

const DEMO: &str = "Title: Demo\nAuthor: A. Writer\n\nINT. ROOM - DAY #7#\n\nA person sits.\n\nPERSON\nHello there.";

#[tokio::test]
async fn test_parse_fountain_text() {
    let json = parse_fountain_text(DEMO.to_string(), None).await;
    let value: serde_json::Value = serde_json::from_str(&json).expect("应返回合法 JSON");

    let elements = value["elements"].as_array().expect("缺少 elements");
    assert_eq!(elements.len(), 4);
    assert_eq!(elements[0]["kind"], "Scene Heading");
    assert_eq!(elements[0]["scene_number"], "7");
    assert_eq!(value["title_page"][0]["key"], "title");
    assert_eq!(value["suppress_scene_numbers"], false);
}

#[tokio::test]
async fn test_parse_with_markup_conf() {
    let conf = SimpleConf {
        parser: "markup".to_string(),
        suppress_scene_numbers: true,
        ..SimpleConf::default()
    };
    let json = parse_fountain_text(DEMO.to_string(), Some(conf)).await;
    let value: serde_json::Value = serde_json::from_str(&json).expect("应返回合法 JSON");
    assert_eq!(value["elements"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["suppress_scene_numbers"], true);
}

#[tokio::test]
async fn test_export_json_files() {
    let dir = tempfile::tempdir().expect("无法创建临时目录");
    let outline_path = dir.path().join("outline.json").display().to_string();
    let characters_path = dir.path().join("characters.json").display().to_string();

    let result = export_outline_json(DEMO.to_string(), outline_path.clone(), None).await;
    assert!(result.success, "导出大纲失败: {}", result.message);
    assert_eq!(result.file_path.as_deref(), Some(outline_path.as_str()));
    let outline: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&outline_path).expect("无法读取大纲")).expect("大纲应为合法 JSON");
    assert_eq!(outline[0]["string"], "Demo");

    let result = export_characters_json(DEMO.to_string(), characters_path.clone(), None).await;
    assert!(result.success, "导出角色失败: {}", result.message);
    let characters: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&characters_path).expect("无法读取角色统计"))
            .expect("角色统计应为合法 JSON");
    assert_eq!(characters["PERSON"]["counts"]["wordCount"], 2);
}

#[tokio::test]
async fn test_export_bundles() {
    let dir = tempfile::tempdir().expect("无法创建临时目录");
    let output_dir = dir.path().display().to_string();

    let result = export_to_text_bundle(DEMO.to_string(), output_dir.clone(), "Demo".to_string(), None).await;
    assert!(result.success, "导出 TextBundle 失败: {}", result.message);
    let bundle = result.file_path.expect("缺少输出路径");
    assert!(Path::new(&bundle).join("Demo.fountain").is_file());

    let conf = SimpleConf {
        include_resources: false,
        ..SimpleConf::default()
    };
    let result = export_to_highland(DEMO.to_string(), output_dir, "Demo".to_string(), Some(conf)).await;
    assert!(result.success, "导出 Highland 失败: {}", result.message);
    assert!(Path::new(&result.file_path.expect("缺少输出路径")).is_file());
}

#[tokio::test]
async fn test_export_failure_is_reported() {
    let dir = tempfile::tempdir().expect("无法创建临时目录");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("写文件失败");

    // 输出目录位于普通文件之下，无法创建
    let output_dir = blocker.join("nested").display().to_string();
    let result = export_to_text_bundle(DEMO.to_string(), output_dir, "Demo".to_string(), None).await;
    assert!(!result.success);
    assert!(result.file_path.is_none());
    assert!(result.message.starts_with("导出失败"));
}

#[test]
fn test_connection_message() {
    assert_eq!(test_connection(), "Rust bridge connection successful!");
}
