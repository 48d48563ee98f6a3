use fountain_sync::{
    apply_patch,
    compute_patch,
    compute_patch_with,
    Conf,
    Hunk,
    HunkKind,
    Patch,
    PatchError
};

#[test]
fn test_identical_texts_have_no_patch() {
    assert_eq!(compute_patch("", ""), None);
    assert_eq!(compute_patch("INT. ROOM - DAY\n", "INT. ROOM - DAY\n"), None);
}

#[test]
fn test_appended_line() {
    let old = "INT. ROOM - DAY\n\nHello.\n";
    let new = "INT. ROOM - DAY\n\nHello.\nBye.\n";
    let patch = compute_patch(old, new).unwrap();

    assert_eq!(patch.hunks.len(), 1);
    let hunk = &patch.hunks[0];
    assert_eq!(hunk.kind, HunkKind::Add);
    assert_eq!((hunk.original_start, hunk.original_end), (3, 3));
    assert_eq!((hunk.modified_start, hunk.modified_end), (3, 4));
    assert_eq!(hunk.text, "Bye.\n");
    assert_eq!(patch.summary, "Added 1 line");
    assert_eq!(apply_patch(old, &patch).unwrap(), new);
}

#[test]
fn test_missing_trailing_newline() {
    let old = "a\nb";
    let new = "a\nc";
    let patch = compute_patch(old, new).unwrap();
    assert_eq!(patch.hunks.len(), 1);
    assert_eq!(patch.hunks[0].kind, HunkKind::Modify);
    assert_eq!(patch.summary, "Changed 1 line");
    assert_eq!(apply_patch(old, &patch).unwrap(), new);

    // 只差结尾换行
    let patch = compute_patch("a\nb", "a\nb\n").unwrap();
    assert_eq!(apply_patch("a\nb", &patch).unwrap(), "a\nb\n");
}

#[test]
fn test_scene_heading_counted_separately() {
    let old = "INT. KITCHEN - DAY\n\nHe cooks.\n";
    let new = "INT. KITCHEN - NIGHT\n\nHe cooks.\n\nShe eats.\n";
    let patch = compute_patch(old, new).unwrap();
    assert_eq!(patch.summary, "Added 2 lines, changed 1 scene heading");
    assert_eq!(apply_patch(old, &patch).unwrap(), new);
}

#[test]
fn test_removal() {
    let old = "one\ntwo\nthree\nfour\n";
    let new = "one\nfour\n";
    let patch = compute_patch(old, new).unwrap();
    assert_eq!(patch.hunks.len(), 1);
    assert_eq!(patch.hunks[0].kind, HunkKind::Remove);
    assert_eq!(patch.hunks[0].text, "");
    assert_eq!(patch.summary, "Removed 2 lines");
    assert_eq!(apply_patch(old, &patch).unwrap(), new);
}

#[test]
fn test_separate_hunks_in_order() {
    let old = "a\nb\nc\nd\ne\n";
    let new = "a\nB\nc\nd\nE\nf\n";
    let patch = compute_patch(old, new).unwrap();
    assert_eq!(patch.hunks.len(), 2);
    assert!(patch.hunks[0].original_end <= patch.hunks[1].original_start);
    assert_eq!(apply_patch(old, &patch).unwrap(), new);
}

#[test]
fn test_falls_back_to_single_hunk() {
    let conf = Conf { max_edit_distance: 1, ..Conf::default() };
    let old = "same\na\nb\nsame too\n";
    let new = "same\nx\ny\nsame too\n";
    let patch = compute_patch_with(old, new, &conf).unwrap();

    assert_eq!(
        patch.hunks,
        vec![Hunk {
            kind: HunkKind::Modify,
            original_start: 1,
            original_end: 3,
            modified_start: 1,
            modified_end: 3,
            text: "x\ny\n".to_string(),
        }]
    );
    assert_eq!(apply_patch(old, &patch).unwrap(), new);
}

#[test]
fn test_json_line() {
    let patch = compute_patch("a\n", "a\nb\n").unwrap();
    let line = patch.to_json_line().unwrap();
    assert!(!line.contains('\n'));
    assert!(line.contains("\"type\":\"add\""));
    assert!(line.contains("\"originalStart\":1"));
    assert_eq!(Patch::from_json_line(&format!("{}\n", line)).unwrap(), patch);
}

fn hunk(original: (usize, usize), modified: (usize, usize), text: &str) -> Hunk {
    Hunk {
        kind: HunkKind::Modify,
        original_start: original.0,
        original_end: original.1,
        modified_start: modified.0,
        modified_end: modified.1,
        text: text.to_string(),
    }
}

#[test]
fn test_apply_errors() {
    let old = "a\nb\n";

    let patch = Patch { hunks: vec![hunk((0, 10), (0, 1), "x\n")], summary: String::new() };
    assert_eq!(
        apply_patch(old, &patch),
        Err(PatchError::OutOfBounds { index: 0, end: 10, len: 2 })
    );

    let patch = Patch {
        hunks: vec![hunk((0, 2), (0, 1), "x\n"), hunk((1, 2), (1, 2), "y\n")],
        summary: String::new(),
    };
    assert_eq!(apply_patch(old, &patch), Err(PatchError::OutOfOrder { index: 1 }));

    let patch = Patch { hunks: vec![hunk((2, 1), (0, 1), "x\n")], summary: String::new() };
    assert_eq!(apply_patch(old, &patch), Err(PatchError::InvalidRange { index: 0 }));
}
