use crate::models::{DualSide, ElementKind, ScriptElement, TitlePage};
use crate::parser::line_classifier::{classify_block_start, BlockStart, CharacterCue};
use crate::utils::{title_case, FountainConstants};

/// 把元素序列写回 Fountain 文本
///
/// 空行由前后元素类型推导；元素的自然写法无法被解析回原样时，
/// 改用强制符号（`!` `@` `.` `>`）。
#[derive(Debug, Default)]
pub struct FountainWriter {
    lines: Vec<String>,
    /// 上一个可见元素的类型
    previous: Option<ElementKind>,
}

impl FountainWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_title_page(&mut self, title_page: &TitlePage) {
        if title_page.is_empty() {
            return;
        }

        let known = FountainConstants::title_keys();
        let mut ordered: Vec<(&str, &str)> = known
            .iter()
            .filter_map(|key| title_page.get(key).map(|value| (*key, value)))
            .collect();
        ordered.extend(title_page.iter().filter(|(key, _)| !known.contains(key)));

        for (key, value) in ordered {
            let key = title_case(key);
            if value.contains('\n') {
                self.lines.push(format!("{}:", key));
                for line in value.split('\n') {
                    self.lines.push(format!("    {}", line));
                }
            } else if value.is_empty() {
                self.lines.push(format!("{}:", key));
            } else {
                self.lines.push(format!("{}: {}", key, value));
            }
        }
        self.lines.push(String::new());
    }

    pub fn write_elements(&mut self, elements: &[ScriptElement]) {
        let visible: Vec<&ScriptElement> = elements.iter().filter(|e| !e.kind.is_marker()).collect();

        for (idx, element) in visible.iter().enumerate() {
            let title_context = self.previous.is_none();
            let next = visible.get(idx + 1).map(|e| &e.kind);

            if self.needs_blank_before(&element.kind) {
                self.lines.push(String::new());
            }

            let text = render(element, next, title_context);
            self.lines.extend(text.split('\n').map(str::to_string));
            self.previous = Some(element.kind.clone());
        }
    }

    pub fn finish(self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn needs_blank_before(&self, current: &ElementKind) -> bool {
        let previous = match &self.previous {
            Some(previous) => previous,
            None => return false,
        };

        match current {
            ElementKind::SceneHeading { .. } | ElementKind::Character { .. } | ElementKind::Transition => true,
            ElementKind::Dialogue | ElementKind::Parenthetical
                if matches!(previous, ElementKind::Character { .. }) || previous.continues_dialogue() =>
            {
                false
            }
            _ if matches!(previous, ElementKind::Character { .. }) || previous.continues_dialogue() => true,
            ElementKind::Action if *previous == ElementKind::Action => true,
            _ => !current.same_type(previous),
        }
    }
}

// 元素的文本写法
fn render(element: &ScriptElement, next: Option<&ElementKind>, title_context: bool) -> String {
    let text = element.text.as_str();
    match &element.kind {
        ElementKind::Action => {
            let expected = BlockStart::Action(first_line(text).to_string());
            if reparses_as(text, None, title_context, &expected) {
                text.to_string()
            } else {
                format!("!{}", text)
            }
        }
        ElementKind::SceneHeading { scene_number, .. } => {
            let line = match scene_number {
                Some(number) => format!("{} #{}#", text, number),
                None => text.to_string(),
            };
            let expected = BlockStart::SceneHeading {
                text: text.to_string(),
                scene_number: scene_number.clone(),
            };
            if reparses_as(&line, None, title_context, &expected) {
                line
            } else {
                format!(".{}", line)
            }
        }
        ElementKind::Character { character_name, extension, dual } => {
            let dual_marker = *dual == Some(DualSide::Right);
            let line = if dual_marker {
                format!("{} ^", text)
            } else {
                text.to_string()
            };
            let expected = BlockStart::Character(CharacterCue {
                name: character_name.clone(),
                extension: extension.clone(),
                dual_marker,
            });
            // 角色行紧跟对白时才能自然识别
            let follower = match next {
                Some(kind) if kind.continues_dialogue() => Some("..."),
                _ => None,
            };
            if reparses_as(&line, follower, title_context, &expected) {
                line
            } else {
                format!("@{}", line)
            }
        }
        ElementKind::Transition => {
            let expected = BlockStart::Transition(text.to_string());
            if reparses_as(text, None, title_context, &expected) {
                text.to_string()
            } else {
                format!("> {}", text)
            }
        }
        ElementKind::Centered => format!("> {} <", text),
        ElementKind::Lyric => format!("~{}", text),
        ElementKind::Section { depth } => format!("{} {}", "#".repeat((*depth).max(1)), text),
        ElementKind::Synopsis => format!("= {}", text),
        ElementKind::Note => format!("[[{}]]", text),
        ElementKind::Boneyard => format!("/*{}*/", text),
        ElementKind::PageBreak => "===".to_string(),
        ElementKind::Dialogue | ElementKind::Parenthetical => text.to_string(),
        ElementKind::DualDialogueBegin | ElementKind::DualDialogueEnd => String::new(),
    }
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

// 检查一段文字作为块起始时是否被识别为预期的元素
fn reparses_as(text: &str, follower: Option<&str>, title_context: bool, expected: &BlockStart) -> bool {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if let Some(follower) = follower {
        lines.push(follower);
    }
    classify_block_start(&lines, 0, title_context) == *expected
}
