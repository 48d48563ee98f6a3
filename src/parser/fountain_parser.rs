use log::trace;
use crate::analytics::estimate_page_count;
use crate::models::{
    Conf,
    DualSide,
    ElementKind,
    Scene,
    Screenplay,
    ScriptElement,
    TitlePage
};
use crate::parser::heading::HeadingParts;
use crate::parser::line_classifier::{classify_block_start, BlockStart, CharacterCue};
use crate::utils::BLOCK_REGEX;

/// Fountain 解析器
///
/// 解析不会失败：无法识别的行一律降级为动作元素。
#[derive(Debug, Clone, Default)]
pub struct FountainParser {
    conf: Conf,
}

// 解析过程中的可变状态
#[derive(Debug, Default)]
struct ParseState {
    elements: Vec<ScriptElement>,
    /// 角色行之后、空行之前
    in_dialogue: bool,
    /// 动作段落尚未被空行结束
    in_action: bool,
    /// 右侧双对白块尚未关闭
    dual_open: bool,
}

impl ParseState {
    fn push(&mut self, kind: ElementKind, text: impl Into<String>, line: usize) {
        self.elements.push(ScriptElement::new(kind, text, line));
    }

    // 跨行元素（注释、笔记）
    fn push_span(&mut self, kind: ElementKind, text: String, line: usize, end_line: usize) {
        let mut element = ScriptElement::new(kind, text, line);
        element.end_line = end_line;
        self.elements.push(element);
    }

    // 空行结束当前块
    fn close_block(&mut self) {
        self.in_action = false;
        if self.in_dialogue {
            self.in_dialogue = false;
            if self.dual_open {
                self.dual_open = false;
                let line = self.elements.last().map_or(0, |e| e.end_line);
                self.push(ElementKind::DualDialogueEnd, "", line);
            }
        }
    }

    // 向上查找可以作为双对白左侧的角色，返回其下标
    fn dual_partner(&self) -> Option<usize> {
        for (idx, element) in self.elements.iter().enumerate().rev() {
            match &element.kind {
                ElementKind::Dialogue | ElementKind::Parenthetical => continue,
                ElementKind::Character { dual: None, .. } => return Some(idx),
                _ => return None,
            }
        }
        None
    }

    fn begin_dialogue(&mut self, cue: CharacterCue, line: usize) {
        let mut dual = None;
        if cue.dual_marker {
            if let Some(idx) = self.dual_partner() {
                if let ElementKind::Character { dual: left, .. } = &mut self.elements[idx].kind {
                    *left = Some(DualSide::Left);
                }
                let begin_line = self.elements[idx].line;
                self.elements
                    .insert(idx, ScriptElement::new(ElementKind::DualDialogueBegin, "", begin_line));
                dual = Some(DualSide::Right);
                self.dual_open = true;
            }
        }

        let text = cue.text();
        self.push(
            ElementKind::Character {
                character_name: cue.name,
                extension: cue.extension,
                dual,
            },
            text,
            line,
        );
        self.in_dialogue = true;
    }

    fn push_dialogue_line(&mut self, text: &str, line: usize) {
        if BLOCK_REGEX.parenthetical.is_match(text) {
            self.push(ElementKind::Parenthetical, text, line);
            return;
        }
        match self.elements.last_mut() {
            Some(last) if last.kind == ElementKind::Dialogue => {
                last.text.push('\n');
                last.text.push_str(text);
                last.end_line = line;
            }
            _ => self.push(ElementKind::Dialogue, text, line),
        }
    }

    fn append_action(&mut self, text: &str, line: usize) {
        if let Some(last) = self.elements.last_mut() {
            last.text.push('\n');
            last.text.push_str(text);
            last.end_line = line;
        }
    }
}

impl FountainParser {
    pub fn new() -> Self {
        Self::with_config(Conf::default())
    }

    pub fn with_config(conf: Conf) -> Self {
        FountainParser { conf }
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// 解析 Fountain 文本
    pub fn parse(&self, script: &str) -> Screenplay {
        let lines: Vec<&str> = script.lines().collect();
        let (title_page, body_start) = parse_title_page(&lines);
        let mut state = ParseState::default();

        let mut i = body_start;
        while i < lines.len() {
            let raw = lines[i].trim_end();
            let line_no = i + 1;

            if raw.trim().is_empty() {
                state.close_block();
                i += 1;
                continue;
            }

            if state.in_dialogue {
                state.push_dialogue_line(raw.trim(), line_no);
                i += 1;
                continue;
            }

            if state.in_action {
                state.append_action(raw, line_no);
                i += 1;
                continue;
            }

            let start = classify_block_start(&lines, i, false);
            trace!(line = line_no, kind = start.name(); "块起始");

            match start {
                BlockStart::Boneyard { text, end } => {
                    state.push_span(ElementKind::Boneyard, text, line_no, end + 1);
                    i = end + 1;
                    continue;
                }
                BlockStart::Note { text, end } => {
                    state.push_span(ElementKind::Note, text, line_no, end + 1);
                    i = end + 1;
                    continue;
                }
                BlockStart::PageBreak => state.push(ElementKind::PageBreak, "", line_no),
                BlockStart::Synopsis(text) => state.push(ElementKind::Synopsis, text, line_no),
                BlockStart::Section { depth, text } => {
                    state.push(ElementKind::Section { depth }, text, line_no)
                }
                BlockStart::Lyric(text) => state.push(ElementKind::Lyric, text, line_no),
                BlockStart::Centered(text) => state.push(ElementKind::Centered, text, line_no),
                BlockStart::Transition(text) => state.push(ElementKind::Transition, text, line_no),
                BlockStart::SceneHeading { text, scene_number } => {
                    let int_ext = HeadingParts::parse(&text).int_ext;
                    state.push(ElementKind::SceneHeading { scene_number, int_ext }, text, line_no);
                }
                BlockStart::Character(cue) => state.begin_dialogue(cue, line_no),
                BlockStart::Action(text) => {
                    state.push(ElementKind::Action, text, line_no);
                    state.in_action = true;
                }
                // 正文中不会出现（title_context 为 false，且空行已处理）
                BlockStart::TitleKey | BlockStart::Blank => {
                    state.push(ElementKind::Action, raw, line_no);
                    state.in_action = true;
                }
            }
            i += 1;
        }
        state.close_block();

        let elements = state.elements;
        let scenes = build_scenes(&elements);
        let page_count = estimate_page_count(&elements, &self.conf);

        Screenplay {
            title_page,
            elements,
            scenes,
            page_count,
        }
    }
}

/// 解析文档开头的标题页，返回标题页与正文起始行下标
///
/// 第一个非空行必须是已知字段。空行结束标题页，除非下一个非空行仍是已知字段。
/// 缩进行或不像 `Key:` 的行是上一字段的续行。
fn parse_title_page(lines: &[&str]) -> (TitlePage, usize) {
    let mut title_page = TitlePage::new();

    let first = lines.iter().position(|l| !l.trim().is_empty());
    let mut i = match first {
        Some(idx) if BLOCK_REGEX.title_key_known.is_match(lines[idx].trim()) => idx,
        _ => return (title_page, 0),
    };

    let mut current_key: Option<String> = None;
    let mut after_break = true;
    while i < lines.len() {
        let raw = lines[i].trim_end();

        if raw.trim().is_empty() {
            let next = (i..lines.len()).find(|&j| !lines[j].trim().is_empty());
            match next {
                Some(j) if BLOCK_REGEX.title_key_known.is_match(lines[j].trim()) => {
                    i = j;
                    after_break = true;
                    continue;
                }
                _ => break,
            }
        }

        let indented = raw.starts_with(char::is_whitespace);
        if !indented || after_break {
            if let Some(captures) = BLOCK_REGEX.title_key_line.captures(raw.trim()) {
                let key = captures.get(1).map_or("", |m| m.as_str());
                let value = captures.get(2).map_or("", |m| m.as_str()).trim();
                title_page.insert(key, value);
                current_key = Some(key.to_string());
                after_break = false;
                i += 1;
                continue;
            }
        }
        after_break = false;

        if let Some(value) = current_key.as_deref().and_then(|k| title_page.value_mut(k)) {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(raw.trim());
        }
        i += 1;
    }

    (title_page, i)
}

/// 按场景标题分组元素；第一个标题之前的元素不属于任何场景
pub fn build_scenes(elements: &[ScriptElement]) -> Vec<Scene> {
    let mut scenes = Vec::new();
    let mut current: Option<Scene> = None;

    for element in elements {
        if let ElementKind::SceneHeading { scene_number, int_ext } = &element.kind {
            if let Some(scene) = current.take() {
                scenes.push(scene);
            }
            let parts = HeadingParts::parse(&element.text);
            current = Some(Scene {
                heading: element.text.clone(),
                int_ext: *int_ext,
                location: parts.location,
                time_of_day: parts.time_of_day,
                scene_number: scene_number.clone(),
                start_line: element.line,
                end_line: element.end_line,
                characters: Vec::new(),
                elements: vec![element.clone()],
            });
            continue;
        }

        if let Some(scene) = current.as_mut() {
            scene.end_line = scene.end_line.max(element.end_line);
            if let Some(name) = element.character_name() {
                if !scene.characters.iter().any(|c| c == name) {
                    scene.characters.push(name.to_string());
                }
            }
            scene.elements.push(element.clone());
        }
    }

    if let Some(scene) = current {
        scenes.push(scene);
    }
    scenes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_page_with_continuations() {
        let text = "Title: BIG FISH\nCredit: written by\nAuthor:\n    John August\n    Daniel Wallace\n\nINT. HOUSE - DAY\n";
        let screenplay = FountainParser::new().parse(text);
        assert_eq!(screenplay.title_page.get("title"), Some("BIG FISH"));
        assert_eq!(screenplay.title_page.get("AUTHOR"), Some("John August\nDaniel Wallace"));
        assert_eq!(screenplay.elements.len(), 1);
        assert_eq!(screenplay.elements[0].line, 7);
    }

    #[test]
    fn no_title_page_without_known_key() {
        let screenplay = FountainParser::new().parse("Bob: hi there\n");
        assert!(screenplay.title_page.is_empty());
        assert_eq!(screenplay.elements[0].kind, ElementKind::Action);
    }

    #[test]
    fn dual_dialogue_markers() {
        let text = "BRICK\nScrew retirement.\n\nSTEEL ^\nScrew retirement.\n";
        let screenplay = FountainParser::new().parse(text);
        let kinds: Vec<&str> = screenplay.elements.iter().map(|e| e.kind.name()).collect();
        assert_eq!(
            kinds,
            vec!["dual_dialogue_begin", "character", "dialogue", "character", "dialogue", "dual_dialogue_end"]
        );
        assert!(matches!(
            screenplay.elements[1].kind,
            ElementKind::Character { dual: Some(DualSide::Left), .. }
        ));
        assert!(matches!(
            screenplay.elements[3].kind,
            ElementKind::Character { dual: Some(DualSide::Right), .. }
        ));
    }

    #[test]
    fn dual_marker_without_partner_is_plain_cue() {
        let screenplay = FountainParser::new().parse("Rain falls.\n\nSTEEL ^\nHello.\n");
        assert!(matches!(
            screenplay.elements[1].kind,
            ElementKind::Character { dual: None, .. }
        ));
        assert_eq!(screenplay.elements.len(), 3);
    }
}
