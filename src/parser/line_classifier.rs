use crate::utils::{FountainConstants, BLOCK_REGEX};

/// 角色提示行
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CharacterCue {
    pub name: String,
    pub extension: Option<String>,
    /// 行尾带 `^`，表示与上一位角色同时说话
    pub dual_marker: bool,
}

impl CharacterCue {
    /// 拆分角色行：名字、括号扩展、双对白标记
    pub fn parse(line: &str) -> CharacterCue {
        let line = line.trim();
        let stripped = line.trim_end_matches(|c: char| c == '^' || c.is_whitespace());
        let dual_marker = line[stripped.len()..].contains('^');

        let (name, extension) = match stripped.find('(') {
            Some(pos) if stripped.ends_with(')') => (
                stripped[..pos].trim().to_string(),
                Some(stripped[pos..].trim().to_string()),
            ),
            _ => (stripped.to_string(), None),
        };

        CharacterCue {
            name,
            extension,
            dual_marker,
        }
    }

    /// 元素文本：名字 + 扩展（不含 `@` 和 `^`）
    pub fn text(&self) -> String {
        match &self.extension {
            Some(ext) if !self.name.is_empty() => format!("{} {}", self.name, ext),
            Some(ext) => ext.clone(),
            None => self.name.clone(),
        }
    }

    /// 不加 `@` 也能被识别为角色：名字较短，以大写字母开头且不含小写字母
    fn is_natural(&self) -> bool {
        !self.name.is_empty()
            && is_short(&self.name)
            && BLOCK_REGEX.character_name.is_match(&self.name)
    }
}

/// 块起始行的分类结果
///
/// 解析器用它决定新块的类型；序列化器用它检查一行文字
/// 能否不加强制符号就被解析回同样的元素。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockStart {
    Blank,
    TitleKey,
    /// end 为块的最后一行下标（含）
    Boneyard { text: String, end: usize },
    Note { text: String, end: usize },
    PageBreak,
    Synopsis(String),
    Section { depth: usize, text: String },
    Lyric(String),
    Centered(String),
    Transition(String),
    SceneHeading { text: String, scene_number: Option<String> },
    Character(CharacterCue),
    Action(String),
}

impl BlockStart {
    pub fn name(&self) -> &'static str {
        match self {
            BlockStart::Blank => "blank",
            BlockStart::TitleKey => "title_key",
            BlockStart::Boneyard { .. } => "boneyard",
            BlockStart::Note { .. } => "note",
            BlockStart::PageBreak => "page_break",
            BlockStart::Synopsis(_) => "synopsis",
            BlockStart::Section { .. } => "section",
            BlockStart::Lyric(_) => "lyric",
            BlockStart::Centered(_) => "centered",
            BlockStart::Transition(_) => "transition",
            BlockStart::SceneHeading { .. } => "scene_heading",
            BlockStart::Character(_) => "character",
            BlockStart::Action(_) => "action",
        }
    }
}

/// 拆出场景编号：`INT. HOUSE - DAY #12A#` => ("INT. HOUSE - DAY", Some("12A"))
pub(crate) fn split_scene_number(text: &str) -> (String, Option<String>) {
    if let Some(captures) = BLOCK_REGEX.scene_number.captures(text) {
        let number = captures.get(2).map_or("", |m| m.as_str()).trim();
        if !number.is_empty() {
            let body = captures.get(1).map_or("", |m| m.as_str()).trim();
            return (body.to_string(), Some(number.to_string()));
        }
    }
    (text.trim().to_string(), None)
}

fn is_short(text: &str) -> bool {
    text.chars().count() <= FountainConstants::MAX_SHORT_LINE_CHARS
}

/// 对第 i 行作为块起始行进行分类
///
/// `title_context` 为真时，已知的标题页字段行会被识别为 `TitleKey`
/// （文档开头，或标题页结束后的第一个正文块）。
pub(crate) fn classify_block_start(lines: &[&str], i: usize, title_context: bool) -> BlockStart {
    let raw = lines[i].trim_end();
    let trimmed = raw.trim_start();

    if trimmed.is_empty() {
        return BlockStart::Blank;
    }

    if title_context && BLOCK_REGEX.title_key_known.is_match(trimmed) {
        return BlockStart::TitleKey;
    }

    // 强制动作
    if let Some(rest) = trimmed.strip_prefix('!') {
        return BlockStart::Action(rest.to_string());
    }

    // 强制角色
    if let Some(rest) = trimmed.strip_prefix('@') {
        return BlockStart::Character(CharacterCue::parse(rest));
    }

    if let Some(rest) = trimmed.strip_prefix("/*") {
        let (text, end) = scan_boneyard(lines, i, rest);
        return BlockStart::Boneyard { text, end };
    }

    if let Some(rest) = trimmed.strip_prefix("[[") {
        if let Some((text, end)) = scan_note(lines, i, rest) {
            return BlockStart::Note { text, end };
        }
    }

    // 分页符必须在概要之前检查，=== 也以 = 开头
    if BLOCK_REGEX.page_break.is_match(trimmed) {
        return BlockStart::PageBreak;
    }

    if let Some(rest) = trimmed.strip_prefix('=') {
        return BlockStart::Synopsis(rest.trim().to_string());
    }

    if trimmed.starts_with('#') {
        let rest = trimmed.trim_start_matches('#');
        return BlockStart::Section {
            depth: trimmed.len() - rest.len(),
            text: rest.trim().to_string(),
        };
    }

    if let Some(rest) = trimmed.strip_prefix('~') {
        return BlockStart::Lyric(rest.trim_start().to_string());
    }

    if let Some(rest) = trimmed.strip_prefix('>') {
        if let Some(inner) = rest.strip_suffix('<') {
            return BlockStart::Centered(inner.trim().to_string());
        }
        return BlockStart::Transition(rest.trim().to_string());
    }

    // 强制场景标题：单个点号开头（省略号不算）
    if trimmed.starts_with('.') && !trimmed.starts_with("..") {
        let rest = trimmed.trim_start_matches(|c: char| c == '.' || c.is_whitespace());
        let (text, scene_number) = split_scene_number(rest);
        return BlockStart::SceneHeading { text, scene_number };
    }

    if BLOCK_REGEX.scene_heading.is_match(trimmed) {
        let (text, scene_number) = split_scene_number(trimmed);
        return BlockStart::SceneHeading { text, scene_number };
    }

    if is_short(trimmed) && BLOCK_REGEX.transition.is_match(trimmed) {
        return BlockStart::Transition(trimmed.to_string());
    }

    // 角色行后面必须紧跟非空行
    let next_is_text = lines
        .get(i + 1)
        .map_or(false, |next| !next.trim().is_empty());
    if next_is_text {
        let cue = CharacterCue::parse(trimmed);
        if cue.is_natural() {
            return BlockStart::Character(cue);
        }
    }

    BlockStart::Action(raw.to_string())
}

// 查找注释块结尾 */，找不到则一直延续到文末
fn scan_boneyard(lines: &[&str], i: usize, first_rest: &str) -> (String, usize) {
    let mut parts = vec![first_rest.to_string()];
    if let Some(inner) = first_rest.strip_suffix("*/") {
        return (inner.to_string(), i);
    }

    for (j, line) in lines.iter().enumerate().skip(i + 1) {
        let line = line.trim_end();
        if let Some(inner) = line.strip_suffix("*/") {
            parts.push(inner.to_string());
            return (parts.join("\n"), j);
        }
        parts.push(line.to_string());
    }

    (parts.join("\n"), lines.len().saturating_sub(1))
}

// 查找笔记结尾 ]]，遇到空行或文末则不是笔记
fn scan_note(lines: &[&str], i: usize, first_rest: &str) -> Option<(String, usize)> {
    if let Some(inner) = first_rest.strip_suffix("]]") {
        return Some((inner.trim().to_string(), i));
    }

    let mut parts = vec![first_rest.to_string()];
    for (j, line) in lines.iter().enumerate().skip(i + 1) {
        let line = line.trim_end();
        if line.trim().is_empty() {
            return None;
        }
        if let Some(inner) = line.strip_suffix("]]") {
            parts.push(inner.to_string());
            return Some((parts.join("\n").trim().to_string(), j));
        }
        parts.push(line.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> BlockStart {
        let lines: Vec<&str> = text.split('\n').collect();
        classify_block_start(&lines, 0, false)
    }

    #[test]
    fn character_requires_following_text() {
        assert!(matches!(classify("JOHN\nHello."), BlockStart::Character(_)));
        assert_eq!(classify("JOHN"), BlockStart::Action("JOHN".to_string()));
    }

    #[test]
    fn long_uppercase_lines_are_action() {
        let shout = "THE CAR EXPLODES IN A MASSIVE FIREBALL THAT LIGHTS UP THE WHOLE STREET.";
        assert_eq!(
            classify(&format!("{}\nPeople scream.", shout)),
            BlockStart::Action(shout.to_string())
        );

        let pull_back = "THE CAMERA SLOWLY PULLS BACK AND WE DISSOLVE TO:";
        assert_eq!(classify(pull_back), BlockStart::Action(pull_back.to_string()));
        assert_eq!(classify("SMASH CUT TO:"), BlockStart::Transition("SMASH CUT TO:".to_string()));
    }

    #[test]
    fn character_cue_parts() {
        let cue = CharacterCue::parse("JANE (V.O.) ^");
        assert_eq!(cue.name, "JANE");
        assert_eq!(cue.extension.as_deref(), Some("(V.O.)"));
        assert!(cue.dual_marker);
        assert_eq!(cue.text(), "JANE (V.O.)");
    }

    #[test]
    fn forced_markers() {
        assert_eq!(classify("!INT. HOUSE"), BlockStart::Action("INT. HOUSE".to_string()));
        assert_eq!(
            classify(".FLASHBACK #3#"),
            BlockStart::SceneHeading { text: "FLASHBACK".to_string(), scene_number: Some("3".to_string()) }
        );
        assert_eq!(classify("> THE END <"), BlockStart::Centered("THE END".to_string()));
        assert_eq!(classify("> FADE OUT."), BlockStart::Transition("FADE OUT.".to_string()));
        assert_eq!(classify("...and then"), BlockStart::Action("...and then".to_string()));
    }

    #[test]
    fn boneyard_and_note_spans() {
        assert_eq!(
            classify("/* hidden\nstill hidden */\nvisible"),
            BlockStart::Boneyard { text: " hidden\nstill hidden ".to_string(), end: 1 }
        );
        assert_eq!(
            classify("[[a note\nspanning lines]]"),
            BlockStart::Note { text: "a note\nspanning lines".to_string(), end: 1 }
        );
        assert_eq!(classify("[[broken\n\nnote]]"), BlockStart::Action("[[broken".to_string()));
    }

    #[test]
    fn page_break_before_synopsis() {
        assert_eq!(classify("==="), BlockStart::PageBreak);
        assert_eq!(classify("= The hero leaves."), BlockStart::Synopsis("The hero leaves.".to_string()));
    }
}
