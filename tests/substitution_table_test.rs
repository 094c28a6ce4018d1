use fountain_script::error::StructuralParseError;
use fountain_script::models::ElementType;
use fountain_script::parser::substitution::{Guard, Substitution, SUBSTITUTIONS};
use fountain_script::parser::{FountainParser, ParseOutput};

/// 交换替换表中相邻的两项
fn swapped(first: &str, second: &str) -> Vec<Substitution> {
    let mut table = SUBSTITUTIONS.to_vec();
    let a = table.iter().position(|r| r.name == first).expect("找不到表项");
    let b = table.iter().position(|r| r.name == second).expect("找不到表项");
    assert_eq!(a + 1, b, "{} 与 {} 应相邻", first, second);
    table.swap(a, b);
    table
}

fn parse_with(table: &[Substitution], text: &str) -> ParseOutput {
    FountainParser::with_table(table)
        .expect("替换表应能编译")
        .parse(text)
        .expect("解析不应失败")
}

fn kinds(output: &ParseOutput) -> Vec<ElementType> {
    output.elements.iter().map(|e| e.kind).collect()
}

#[test]
fn test_table_order() {
    let names: Vec<&str> = SUBSTITUTIONS.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "line_breaks",
            "boneyard",
            "comment",
            "synopsis",
            "page_break",
            "centered",
            "forced_transition",
            "scene_heading",
            "first_line_action",
            "transition",
            "character",
            "parenthetical",
            "dialogue",
            "section_heading",
            "action",
            "empty_action",
            "newline_sentinel",
        ],
        "替换表顺序决定解析结果，不能随意调整"
    );
}

#[test]
fn test_swap_parenthetical_and_dialogue() {
    let text = "INT. ROOM - DAY\n\nBOB\nHi\n(beat)\nThere";
    let expected = parse_with(SUBSTITUTIONS, text);
    assert_eq!(
        kinds(&expected),
        vec![
            ElementType::SceneHeading,
            ElementType::Character,
            ElementType::Dialogue,
            ElementType::Parenthetical,
            ElementType::Dialogue,
        ]
    );

    let reordered = parse_with(&swapped("parenthetical", "dialogue"), text);
    assert_ne!(reordered.elements, expected.elements, "交换顺序后结果应不同");
}

#[test]
fn test_swap_scene_heading_and_first_line_action() {
    let text = "INT. HOUSE - DAY\n\nStuff happens.";
    let expected = parse_with(SUBSTITUTIONS, text);
    assert_eq!(expected.elements[0].kind, ElementType::SceneHeading);

    let reordered = parse_with(&swapped("scene_heading", "first_line_action"), text);
    assert_eq!(reordered.elements[0].kind, ElementType::Action, "首行会先被当作动作");
}

#[test]
fn test_swap_action_and_empty_action() {
    let text = "INT. ROOM - DAY\n\nBOB\nHi.\n\nShe leaves.";
    let expected = parse_with(SUBSTITUTIONS, text);
    assert!(expected.elements.iter().all(|e| !e.text.trim().is_empty()));

    let reordered = parse_with(&swapped("action", "empty_action"), text);
    assert!(
        reordered.elements.iter().any(|e| e.kind == ElementType::Action && e.text.trim().is_empty()),
        "空动作不会被清理"
    );
}

#[test]
fn test_swap_centered_and_forced_transition() {
    let text = "INT. ROOM - DAY\n\n> THE END <\n\nFin.";
    let expected = parse_with(SUBSTITUTIONS, text);
    assert!(expected.elements[1].is_centered);

    let reordered = parse_with(&swapped("centered", "forced_transition"), text);
    assert_eq!(reordered.elements[1].kind, ElementType::Transition, "居中文本会被当作转场");
}

#[test]
fn test_template_referencing_missing_group() {
    let mut table = SUBSTITUTIONS.to_vec();
    table[2] = Substitution {
        name: "comment",
        pattern: r"\n\[\[[^<>]+?\]\]\n",
        template: "\n<Comment>$1</Comment>\n",
        guard: Guard::None,
    };
    match FountainParser::with_table(&table) {
        Err(StructuralParseError::MismatchedPatternTemplate { index, group, available }) => {
            assert_eq!(index, 2);
            assert_eq!(group, 1);
            assert_eq!(available, 0);
        }
        Err(other) => panic!("错误类型不正确: {}", other),
        Ok(_) => panic!("模板引用不存在的组时应报错"),
    }
}

#[test]
fn test_invalid_pattern() {
    let mut table = SUBSTITUTIONS.to_vec();
    table[0].pattern = r"(unclosed";
    assert!(matches!(
        FountainParser::with_table(&table),
        Err(StructuralParseError::InvalidPattern { index: 0, .. })
    ));
}
