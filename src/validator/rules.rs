use std::collections::HashSet;
use crate::analytics::wrapped_line_count;
use crate::models::{Conf, DualSide, ElementKind, IntExt, Screenplay, ScriptElement};
use crate::utils::{has_lowercase, FountainConstants};
use super::{Issue, Severity};

pub(crate) type Rule = fn(&Screenplay, &Conf, &mut Vec<Issue>);

pub(crate) const ALL_RULES: &[Rule] = &[
    dialogue_without_character,
    character_without_dialogue,
    empty_scene_heading,
    unbalanced_dual_dialogue,
    duplicate_scene_number,
    missing_time_of_day,
    empty_scene,
    non_standard_transition,
    lowercase_character_name,
    long_dialogue,
    action_before_first_scene,
];

// 跳过结构标记的可见元素
fn visible(screenplay: &Screenplay) -> Vec<&ScriptElement> {
    screenplay
        .elements
        .iter()
        .filter(|e| !e.kind.is_marker())
        .collect()
}

fn in_dialogue_block(kind: &ElementKind) -> bool {
    matches!(kind, ElementKind::Character { .. }) || kind.continues_dialogue()
}

fn dialogue_without_character(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    let elements = visible(screenplay);
    for (idx, element) in elements.iter().enumerate() {
        if !element.kind.continues_dialogue() {
            continue;
        }
        let attached = idx > 0 && in_dialogue_block(&elements[idx - 1].kind);
        if !attached {
            issues.push(Issue::new(
                element.line,
                Severity::Error,
                "dialogue-without-character",
                "对白前没有角色名",
            ));
        }
    }
}

fn character_without_dialogue(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    let elements = visible(screenplay);
    for (idx, element) in elements.iter().enumerate() {
        if let Some(name) = element.character_name() {
            let spoken = elements
                .get(idx + 1)
                .map_or(false, |next| next.kind.continues_dialogue());
            if !spoken {
                issues.push(Issue::new(
                    element.line,
                    Severity::Error,
                    "character-without-dialogue",
                    format!("角色 {} 之后没有对白", name),
                ));
            }
        }
    }
}

fn empty_scene_heading(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    for element in &screenplay.elements {
        if matches!(element.kind, ElementKind::SceneHeading { .. }) && element.text.trim().is_empty() {
            issues.push(Issue::new(
                element.line,
                Severity::Error,
                "empty-scene-heading",
                "场景标题为空",
            ));
        }
    }
}

fn unbalanced_dual_dialogue(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    let mut open: Option<usize> = None;
    let mut has_left = false;

    for element in &screenplay.elements {
        match &element.kind {
            ElementKind::DualDialogueBegin => {
                if open.is_some() {
                    issues.push(Issue::new(
                        element.line,
                        Severity::Error,
                        "unbalanced-dual-dialogue",
                        "双对白尚未结束又开始新的双对白",
                    ));
                }
                open = Some(element.line);
                has_left = false;
            }
            ElementKind::DualDialogueEnd => {
                if open.take().is_none() {
                    issues.push(Issue::new(
                        element.line,
                        Severity::Error,
                        "unbalanced-dual-dialogue",
                        "双对白结束标记没有对应的开始标记",
                    ));
                }
            }
            ElementKind::Character { dual: Some(DualSide::Left), .. } => has_left = true,
            ElementKind::Character { dual: Some(DualSide::Right), .. } => {
                if open.is_none() || !has_left {
                    issues.push(Issue::new(
                        element.line,
                        Severity::Error,
                        "unbalanced-dual-dialogue",
                        "双对白右侧角色缺少左侧角色",
                    ));
                }
            }
            _ => {}
        }
    }

    if let Some(line) = open {
        issues.push(Issue::new(
            line,
            Severity::Error,
            "unbalanced-dual-dialogue",
            "双对白没有结束标记",
        ));
    }
}

fn duplicate_scene_number(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    let mut seen = HashSet::new();
    for scene in &screenplay.scenes {
        if let Some(number) = &scene.scene_number {
            if !seen.insert(number.as_str()) {
                issues.push(Issue::new(
                    scene.start_line,
                    Severity::Warning,
                    "duplicate-scene-number",
                    format!("场景编号 {} 重复", number),
                ));
            }
        }
    }
}

fn missing_time_of_day(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    for scene in &screenplay.scenes {
        if scene.int_ext != IntExt::None && scene.time_of_day.is_empty() {
            issues.push(Issue::new(
                scene.start_line,
                Severity::Warning,
                "missing-time-of-day",
                format!("场景 {} 缺少时间（如 - DAY）", scene.heading),
            ));
        }
    }
}

fn empty_scene(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    for scene in &screenplay.scenes {
        if scene.is_empty() {
            issues.push(Issue::new(
                scene.start_line,
                Severity::Warning,
                "empty-scene",
                format!("场景 {} 没有内容", scene.heading),
            ));
        }
    }
}

fn non_standard_transition(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    let standard = FountainConstants::standard_transitions();
    for element in &screenplay.elements {
        if element.kind != ElementKind::Transition {
            continue;
        }
        let text = element.text.trim();
        if !text.ends_with("TO:") && !standard.contains(&text) {
            issues.push(Issue::new(
                element.line,
                Severity::Info,
                "non-standard-transition",
                format!("转场 {} 不是常见写法", text),
            ));
        }
    }
}

fn lowercase_character_name(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    for element in &screenplay.elements {
        if let Some(name) = element.character_name() {
            if has_lowercase(name) {
                issues.push(Issue::new(
                    element.line,
                    Severity::Info,
                    "lowercase-character-name",
                    format!("角色名 {} 含小写字母", name),
                ));
            }
        }
    }
}

fn long_dialogue(screenplay: &Screenplay, conf: &Conf, issues: &mut Vec<Issue>) {
    for element in &screenplay.elements {
        if element.kind != ElementKind::Dialogue {
            continue;
        }
        let lines = wrapped_line_count(&element.text, conf.dialogue_chars_per_line);
        if lines > conf.max_dialogue_lines {
            issues.push(Issue::new(
                element.line,
                Severity::Info,
                "long-dialogue",
                format!("对白约 {} 行，超过 {} 行", lines, conf.max_dialogue_lines),
            ));
        }
    }
}

// 只报告第一处
fn action_before_first_scene(screenplay: &Screenplay, _conf: &Conf, issues: &mut Vec<Issue>) {
    if screenplay.scenes.is_empty() {
        return;
    }
    let first_action = screenplay
        .elements
        .iter()
        .take_while(|e| !matches!(e.kind, ElementKind::SceneHeading { .. }))
        .find(|e| e.kind == ElementKind::Action);
    if let Some(element) = first_action {
        issues.push(Issue::new(
            element.line,
            Severity::Info,
            "action-before-first-scene",
            "第一个场景标题之前有动作描述",
        ));
    }
}
