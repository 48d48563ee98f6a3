use unicode_segmentation::UnicodeSegmentation;
use crate::models::{Conf, ElementKind, ScriptElement};

/// 按每行可容纳的字符数估算折行后的行数，每个物理行至少占一行
pub fn wrapped_line_count(text: &str, chars_per_line: usize) -> usize {
    let width = chars_per_line.max(1);
    text.split('\n')
        .map(|line| {
            let len = line.graphemes(true).count();
            ((len + width - 1) / width).max(1)
        })
        .sum()
}

/// 估算排版后的总行数
///
/// 分页符把累计行数补齐到下一页的起点。
pub fn estimate_line_count(elements: &[ScriptElement], conf: &Conf) -> usize {
    let page = conf.lines_per_page.max(1);
    let mut total = 0;

    for element in elements {
        if element.kind == ElementKind::PageBreak {
            total = (total + page - 1) / page * page;
            continue;
        }
        total += match &element.kind {
            ElementKind::SceneHeading { .. } => 2,
            ElementKind::Action => wrapped_line_count(&element.text, conf.action_chars_per_line) + 1,
            ElementKind::Character { .. } => 2,
            ElementKind::Dialogue => wrapped_line_count(&element.text, conf.dialogue_chars_per_line),
            ElementKind::Parenthetical => 1,
            ElementKind::Transition => 2,
            ElementKind::Centered
            | ElementKind::Lyric
            | ElementKind::Section { .. }
            | ElementKind::Synopsis
            | ElementKind::Note => 1,
            ElementKind::Boneyard
            | ElementKind::PageBreak
            | ElementKind::DualDialogueBegin
            | ElementKind::DualDialogueEnd => 0,
        };
    }

    total
}

/// 估算页数
pub fn estimate_page_count(elements: &[ScriptElement], conf: &Conf) -> usize {
    let page = conf.lines_per_page.max(1);
    (estimate_line_count(elements, conf) + page - 1) / page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_by_grapheme_width() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghij", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghijk", 10), 2);
        assert_eq!(wrapped_line_count("short\nlines", 10), 2);
        assert_eq!(wrapped_line_count("日本語です", 2), 3);
    }

    #[test]
    fn page_break_rounds_up() {
        let conf = Conf::default();
        let elements = vec![
            ScriptElement::action("One."),
            ScriptElement::new(ElementKind::PageBreak, "", 0),
            ScriptElement::action("Two."),
        ];
        assert_eq!(estimate_line_count(&elements, &conf), 58);
        assert_eq!(estimate_page_count(&elements, &conf), 2);
    }
}
