use fountain_sync::{parse, DualSide, ElementKind, FountainParser, IntExt, ScriptElement};
use std::fs;
use std::path::Path;

fn kinds(elements: &[ScriptElement]) -> Vec<&'static str> {
    elements.iter().map(|e| e.kind.name()).collect()
}

#[test]
fn test_kitchen_scenario() {
    let screenplay = parse("INT. KITCHEN - DAY\n\nJohn enters.\n\nJOHN\nHello.\n");

    assert_eq!(screenplay.scenes.len(), 1);
    let scene = &screenplay.scenes[0];
    assert_eq!(scene.heading, "INT. KITCHEN - DAY");
    assert_eq!(scene.int_ext, IntExt::Int);
    assert_eq!(scene.location, "KITCHEN");
    assert_eq!(scene.time_of_day, "DAY");
    assert_eq!(scene.start_line, 1);
    assert_eq!(scene.end_line, 6);
    assert_eq!(scene.characters, vec!["JOHN".to_string()]);

    assert_eq!(kinds(&screenplay.elements), vec!["scene_heading", "action", "character", "dialogue"]);
    assert_eq!(screenplay.elements[1].text, "John enters.");
    assert_eq!(screenplay.elements[2].character_name(), Some("JOHN"));
    assert_eq!(screenplay.elements[3].text, "Hello.");
    assert_eq!(screenplay.page_count, 1);
}

#[test]
fn test_sample_script() {
    let script = fs::read_to_string(Path::new("tests/test_data/sample.fountain")).expect("无法读取测试文件");
    let screenplay = FountainParser::new().parse(&script);

    assert_eq!(screenplay.title_page.get("title"), Some("THE LAST LIGHTHOUSE"));
    assert_eq!(screenplay.title_page.get("Draft Date"), Some("2026-03-01"));
    assert_eq!(screenplay.title_page.get("contact"), Some("Harbor Street 12\nPortsmouth"));

    assert_eq!(screenplay.scenes.len(), 3);
    assert_eq!(screenplay.scenes[0].scene_number.as_deref(), Some("1"));
    assert_eq!(screenplay.scenes[1].heading, "INT. LAMP ROOM - CONTINUOUS");
    assert_eq!(screenplay.scenes[1].characters, vec!["ELLA".to_string(), "TOM".to_string()]);
    assert_eq!(screenplay.scenes[2].heading, "FLASHBACK - 1985");
    assert_eq!(screenplay.scenes[2].int_ext, IntExt::None);

    let elements = &screenplay.elements;
    assert_eq!(elements[0].kind, ElementKind::Transition);
    assert_eq!(elements[0].text, "FADE IN:");
    assert_eq!(elements[1].kind, ElementKind::Section { depth: 1 });
    assert_eq!(elements[2].kind, ElementKind::Synopsis);
    assert_eq!(elements[2].text, "A keeper refuses to leave.");

    let dialogue = elements
        .iter()
        .find(|e| e.kind == ElementKind::Dialogue)
        .expect("应有对白");
    assert_eq!(dialogue.text, "One more night.\nJust one.");

    let tom = elements
        .iter()
        .find(|e| e.character_name() == Some("TOM"))
        .expect("应有 TOM");
    assert_eq!(tom.text, "TOM (O.S.)");
    assert!(matches!(
        &tom.kind,
        ElementKind::Character { extension: Some(ext), dual: None, .. } if ext == "(O.S.)"
    ));

    let sides: Vec<Option<DualSide>> = elements
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::Character { dual, .. } => Some(*dual),
            _ => None,
        })
        .collect();
    assert_eq!(
        sides,
        vec![None, None, Some(DualSide::Left), Some(DualSide::Right)]
    );
    assert_eq!(elements.iter().filter(|e| e.kind == ElementKind::DualDialogueBegin).count(), 1);
    assert_eq!(elements.iter().filter(|e| e.kind == ElementKind::DualDialogueEnd).count(), 1);

    let boneyard = elements.iter().find(|e| e.kind == ElementKind::Boneyard).expect("应有注释");
    assert_eq!(boneyard.text, " The old opening,\nkept for reference. ");
    assert_eq!(boneyard.end_line, boneyard.line + 1);

    let tail: Vec<&str> = kinds(elements).into_iter().rev().take(4).collect();
    assert_eq!(tail, vec!["action", "page_break", "centered", "lyric"]);
    let last = elements.last().expect("应有元素");
    assert_eq!(last.text, "ELLA\nis written on the wall.");
}

#[test]
fn test_inline_note_stays_in_action() {
    let screenplay = parse("INT. HOUSE - DAY\n\nShe waits. [[check this]]\n");
    assert_eq!(screenplay.elements[1].kind, ElementKind::Action);
    assert_eq!(screenplay.elements[1].text, "She waits. [[check this]]");
    assert_eq!(screenplay.elements[1].clean_text(), "She waits.");
}

#[test]
fn test_multiline_action_block() {
    let screenplay = parse("The door opens.\n  Wind howls.   \nSilence.\n\nINT. HALL - DAY\n");
    assert_eq!(screenplay.elements[0].text, "The door opens.\n  Wind howls.\nSilence.");
    assert_eq!(screenplay.elements[0].line, 1);
    assert_eq!(screenplay.elements[0].end_line, 3);
    // 第一个场景之前的动作不属于任何场景
    assert_eq!(screenplay.scenes.len(), 1);
    assert_eq!(screenplay.scenes[0].start_line, 5);
}

#[test]
fn test_character_needs_dialogue_line() {
    let screenplay = parse("BANG\n\nNothing else.\n");
    assert_eq!(kinds(&screenplay.elements), vec!["action", "action"]);
}

#[test]
fn test_scene_numbers_and_prefixes() {
    let screenplay = parse("INT./EXT. CAR - MOVING #12A#\n\nI/E. PORCH - DUSK\n\nEST. CITY - DAWN\n");
    let numbers: Vec<Option<&str>> = screenplay.scenes.iter().map(|s| s.scene_number.as_deref()).collect();
    assert_eq!(numbers, vec![Some("12A"), None, None]);
    let int_ext: Vec<IntExt> = screenplay.scenes.iter().map(|s| s.int_ext).collect();
    assert_eq!(int_ext, vec![IntExt::IntExt, IntExt::IntExt, IntExt::Ext]);
    assert_eq!(screenplay.scenes[0].heading, "INT./EXT. CAR - MOVING");
}

#[test]
fn test_malformed_input_never_fails() {
    let screenplay = parse("[[unclosed note\n\n/* unclosed boneyard\nINT. GONE - DAY\n");
    assert_eq!(kinds(&screenplay.elements), vec!["action", "boneyard"]);
    assert!(screenplay.scenes.is_empty());
    assert!(parse("").elements.is_empty());
}

#[test]
fn test_json_shape() {
    let screenplay = parse("INT. HOUSE - DAY #3#\n");
    let json = serde_json::to_value(&screenplay).unwrap();
    assert_eq!(json["elements"][0]["type"], "scene_heading");
    assert_eq!(json["elements"][0]["sceneNumber"], "3");
    assert_eq!(json["elements"][0]["intExt"], "int");
    assert_eq!(json["scenes"][0]["startLine"], 1);
    assert_eq!(json["pageCount"], 1);
}

#[test]
fn test_long_uppercase_beat_is_action() {
    let script = "INT. STREET - NIGHT\n\nTHE CAR EXPLODES IN A MASSIVE FIREBALL THAT LIGHTS UP THE WHOLE STREET.\nPeople scream and run.\n";
    let screenplay = parse(script);

    assert_eq!(kinds(&screenplay.elements), vec!["scene_heading", "action"]);
    assert_eq!(
        screenplay.elements[1].text,
        "THE CAR EXPLODES IN A MASSIVE FIREBALL THAT LIGHTS UP THE WHOLE STREET.\nPeople scream and run."
    );
    assert!(screenplay.scenes[0].characters.is_empty());
    assert!(fountain_sync::analyze(&screenplay).characters.is_empty());

    // 加 @ 仍可强制为角色
    let forced = parse("@THE MAN WHO WAS THERE BEFORE ANYONE ELSE ARRIVED\nHello.\n");
    assert_eq!(kinds(&forced.elements), vec!["character", "dialogue"]);
    assert_eq!(
        fountain_sync::serialize(&forced),
        "@THE MAN WHO WAS THERE BEFORE ANYONE ELSE ARRIVED\nHello.\n"
    );
}
