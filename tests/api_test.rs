use fountain_sync::api::{analyze_text, compute_patches, parse_fountain_text, reconcile_outline, validate_text};
use fountain_sync::{apply_patch, CharacterId, CharacterProfile, Conf, SceneStatus};

const DRAFT: &str = "INT. KITCHEN - DAY\n\nJohn enters.\n\nJOHN\nHello.\n";

#[tokio::test]
async fn test_parse_fountain_text_json() {
    let json = parse_fountain_text(DRAFT.to_string(), None).await;
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["elements"][0]["type"], "scene_heading");
    assert_eq!(value["elements"][2]["characterName"], "JOHN");
    assert_eq!(value["scenes"][0]["location"], "KITCHEN");
    assert_eq!(value["pageCount"], 1);
}

#[tokio::test]
async fn test_validate_and_analyze() {
    let issues = validate_text("JOHN\n".to_string(), None).await;
    assert!(issues.is_empty());

    let issues = validate_text("@JOHN\n".to_string(), None).await;
    assert_eq!(issues[0].rule, "character-without-dialogue");

    let conf = Conf { lines_per_page: 4, ..Conf::default() };
    let stats = analyze_text(DRAFT.to_string(), Some(conf)).await;
    assert_eq!(stats.page_count, 2);
    assert_eq!(stats.dialogue_count, 1);
}

#[tokio::test]
async fn test_compute_patches_for_each_pair() {
    let revisions = vec![
        DRAFT.to_string(),
        DRAFT.to_string(),
        format!("{}\nCUT TO:\n", DRAFT),
    ];
    let patches = compute_patches(revisions.clone(), None).await.unwrap();

    assert_eq!(patches.len(), 2);
    assert!(patches[0].is_none());
    let patch = patches[1].as_ref().unwrap();
    assert_eq!(apply_patch(&revisions[1], patch).unwrap(), revisions[2]);

    assert!(compute_patches(vec![DRAFT.to_string()], None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reconcile_outline_links_characters() {
    let profiles = vec![CharacterProfile {
        id: CharacterId::new("ch_john"),
        name: "John".to_string(),
        aliases: vec![],
    }];
    let first = reconcile_outline(DRAFT.to_string(), vec![], profiles.clone(), None).await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].status, SceneStatus::Drafted);
    assert_eq!(first[0].character_ids, vec![CharacterId::new("ch_john")]);

    let edited = DRAFT.replace("DAY", "NIGHT");
    let second = reconcile_outline(edited, first.clone(), profiles, None).await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, first[0].id);
    assert_eq!(second[0].time_of_day, "NIGHT");
}
