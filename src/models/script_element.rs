use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INLINE_MARKUP: Regex = Regex::new(r"(?s)\[\[.*?\]\]|/\*.*?\*/").unwrap();
}

/// 双对白位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualSide {
    Left,
    Right,
}

/// 场景标题的内外景标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntExt {
    Int,
    Ext,
    IntExt,
    #[default]
    None,
}

/// 元素类型及各类型专属字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    #[serde(rename_all = "camelCase")]
    SceneHeading {
        scene_number: Option<String>,
        int_ext: IntExt,
    },
    Action,
    Centered,
    Lyric,
    #[serde(rename_all = "camelCase")]
    Character {
        character_name: String,
        extension: Option<String>,
        dual: Option<DualSide>,
    },
    Dialogue,
    Parenthetical,
    Transition,
    Section {
        depth: usize,
    },
    Synopsis,
    Note,
    Boneyard,
    PageBreak,
    DualDialogueBegin,
    DualDialogueEnd,
}

impl ElementKind {
    /// 类型名，与 JSON 中的 `type` 字段一致
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::SceneHeading { .. } => "scene_heading",
            ElementKind::Action => "action",
            ElementKind::Centered => "centered",
            ElementKind::Lyric => "lyric",
            ElementKind::Character { .. } => "character",
            ElementKind::Dialogue => "dialogue",
            ElementKind::Parenthetical => "parenthetical",
            ElementKind::Transition => "transition",
            ElementKind::Section { .. } => "section",
            ElementKind::Synopsis => "synopsis",
            ElementKind::Note => "note",
            ElementKind::Boneyard => "boneyard",
            ElementKind::PageBreak => "page_break",
            ElementKind::DualDialogueBegin => "dual_dialogue_begin",
            ElementKind::DualDialogueEnd => "dual_dialogue_end",
        }
    }

    /// 是否为不可见的结构标记
    pub fn is_marker(&self) -> bool {
        matches!(self, ElementKind::DualDialogueBegin | ElementKind::DualDialogueEnd)
    }

    /// 是否属于对白块（角色之后的对白与括号注释）
    pub fn continues_dialogue(&self) -> bool {
        matches!(self, ElementKind::Dialogue | ElementKind::Parenthetical)
    }

    /// 忽略载荷，只比较类型
    pub fn same_type(&self, other: &ElementKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// 剧本元素，一个格式化的行组对应一个元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptElement {
    #[serde(flatten)]
    pub kind: ElementKind,
    pub text: String,
    /// 起始行号（从 1 开始）
    pub line: usize,
    /// 结束行号（含）
    pub end_line: usize,
}

impl ScriptElement {
    pub fn new(kind: ElementKind, text: impl Into<String>, line: usize) -> Self {
        ScriptElement {
            kind,
            text: text.into(),
            line,
            end_line: line,
        }
    }

    pub fn action(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Action, text, 0)
    }

    pub fn dialogue(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Dialogue, text, 0)
    }

    pub fn character(name: &str) -> Self {
        Self::new(
            ElementKind::Character {
                character_name: name.to_string(),
                extension: None,
                dual: None,
            },
            name,
            0,
        )
    }

    /// 类型与文本相同即视为结构等价，行号不参与比较
    pub fn same_content(&self, other: &ScriptElement) -> bool {
        self.kind == other.kind && self.text == other.text
    }

    /// 角色名（仅角色元素有效）
    pub fn character_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Character { character_name, .. } => Some(character_name.as_str()),
            _ => None,
        }
    }

    // 获取清理后的文本(去除格式标记与内联注释)
    pub fn clean_text(&self) -> String {
        let t = INLINE_MARKUP.replace_all(&self.text, "");
        t.replace(&['*', '_'][..], "").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_markup() {
        let el = ScriptElement::action("He *runs* [[fast?]] to the _door_. /* cut */");
        assert_eq!(el.clean_text(), "He runs  to the door.");
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let el = ScriptElement::character("JOHN");
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "character");
        assert_eq!(json["characterName"], "JOHN");
        assert_eq!(json["text"], "JOHN");
    }
}
