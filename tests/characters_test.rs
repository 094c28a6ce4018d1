use fountain_script::models::{CharacterGender, FountainScript};
use fountain_script::parser::ParserType;

fn script_from(text: &str, parser: ParserType) -> FountainScript {
    FountainScript::from_string(text, parser).expect("解析不应失败")
}

#[test]
fn test_character_accounting() {
    for parser in [ParserType::Fast, ParserType::Markup] {
        let script = script_from(
            "INT. ROOM - DAY\n\nCHARACTER\nLine one.\nLine two words here.",
            parser,
        );
        let characters = script.extract_characters();
        let info = characters.get("CHARACTER").expect("应统计到 CHARACTER");

        assert_eq!(info.line_count(), 1, "{:?}: 台词次数不正确", parser);
        assert_eq!(info.word_count(), 6, "{:?}: 词数应为两行之和", parser);
        assert_eq!(info.scenes, vec![0]);
        assert_eq!(info.gender, CharacterGender::default());
        assert!(info.color.is_none());
    }
}

#[test]
fn test_demo_characters() {
    let script = script_from(
        "Title: Demo\nAuthor: A. Writer\n\nINT. ROOM - DAY\n\nA person sits.\n\nPERSON\nHello there.",
        ParserType::Fast,
    );
    let characters = script.extract_characters();
    assert_eq!(characters.len(), 1);

    let person = &characters["PERSON"];
    assert_eq!(person.line_count(), 1);
    assert_eq!(person.word_count(), 2);
    assert_eq!(person.scenes, vec![0]);
}

#[test]
fn test_scenes_are_deduplicated_in_order() {
    let text = "INT. ONE - DAY\n\nBOB\nHi.\n\nBOB\nAgain.\n\nEXT. TWO - DAY\n\nALICE\nYo.\n\nINT. THREE - DAY\n\nBOB (V.O.)\nStill here.";
    let script = script_from(text, ParserType::Fast);
    let characters = script.extract_characters();

    let bob = &characters["BOB"];
    assert_eq!(bob.line_count(), 3, "扩展名不影响角色归属");
    assert_eq!(bob.scenes, vec![0, 2]);
    assert_eq!(bob.word_count(), 4);

    let alice = &characters["ALICE"];
    assert_eq!(alice.scenes, vec![1]);

    let names: Vec<&String> = characters.keys().collect();
    assert_eq!(names, vec!["ALICE", "BOB"], "角色按名称排序");
}

#[test]
fn test_dialogue_before_any_scene() {
    let script = script_from("BOB\nNo scene yet.", ParserType::Fast);
    let characters = script.extract_characters();
    assert!(characters["BOB"].scenes.is_empty(), "第一个场景之前的对白不记录场景");
}

#[test]
fn test_first_dialogue() {
    let text = "INT. ROOM - DAY\n\nPERSON\n(quietly)\nHello there.\n\nBOB (V.O.)\nHi.\n\nPERSON\nBye.";
    let script = script_from(text, ParserType::Fast);

    assert_eq!(script.first_dialogue("PERSON").as_deref(), Some("Hello there."));
    assert_eq!(script.first_dialogue("bob").as_deref(), Some("Hi."), "查找应忽略大小写与扩展名");
    assert_eq!(script.first_dialogue("NOBODY"), None);
}

#[test]
fn test_characters_json_shape() {
    let script = script_from("INT. ROOM - DAY\n\nPERSON\nHello there.", ParserType::Fast);
    let json = script.characters_json().expect("序列化不应失败");
    let value: serde_json::Value = serde_json::from_str(&json).expect("应为合法 JSON");

    let person = &value["PERSON"];
    assert_eq!(person["counts"]["lineCount"], 1);
    assert_eq!(person["counts"]["wordCount"], 2);
    assert_eq!(person["scenes"], serde_json::json!([0]));
    assert_eq!(person["gender"], serde_json::json!({ "unspecified": {} }));
    assert!(person.get("color").is_none(), "未设置颜色时不应输出 color");

    let counts = json.find("\"counts\"").expect("缺少 counts");
    let gender = json.find("\"gender\"").expect("缺少 gender");
    let scenes = json.find("\"scenes\"").expect("缺少 scenes");
    assert!(counts < gender && gender < scenes, "键应按字母顺序输出");
}

#[test]
fn test_character_color_serialized_when_set() {
    let mut characters = script_from("INT. ROOM - DAY\n\nPERSON\nHello there.", ParserType::Fast).extract_characters();
    characters.get_mut("PERSON").expect("缺少 PERSON").color = Some("#ff0000".to_string());

    let value = serde_json::to_value(&characters).expect("序列化不应失败");
    assert_eq!(value["PERSON"]["color"], "#ff0000");
}
