use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use crate::models::{ElementKind, ScriptElement};
use crate::parser::line_classifier::CharacterCue;
use crate::parser::HeadingParts;
use crate::serializer::serialize_elements;

lazy_static! {
    static ref FDX_REGEX: FdxRegex = FdxRegex {
        root: Regex::new(r"<FinalDraft\b").unwrap(),
        title_page: Regex::new(r"(?s)<TitlePage\b.*?</TitlePage>").unwrap(),
        content: Regex::new(r"(?s)<Content\b[^>]*>(.*?)</Content>").unwrap(),
        paragraph: Regex::new(r"(?s)<Paragraph\b([^>]*?)>(.*?)</Paragraph>").unwrap(),
        text: Regex::new(r"(?s)<Text\b[^>]*>(.*?)</Text>").unwrap(),
        type_attr: Regex::new(r#"\bType="([^"]*)""#).unwrap(),
        number_attr: Regex::new(r#"\bNumber="([^"]*)""#).unwrap(),
        alignment_attr: Regex::new(r#"\bAlignment="([^"]*)""#).unwrap(),
    };
}

struct FdxRegex {
    root: Regex,
    title_page: Regex,
    content: Regex,
    paragraph: Regex,
    text: Regex,
    type_attr: Regex,
    number_attr: Regex,
    alignment_attr: Regex,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FdxError {
    #[error("不是FDX文档：缺少 FinalDraft 根元素")]
    MissingRoot,

    #[error("FDX文档缺少 Content 元素")]
    MissingContent,
}

pub(crate) fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn attribute(regex: &Regex, attrs: &str) -> Option<String> {
    regex
        .captures(attrs)
        .and_then(|c| c.get(1))
        .map(|m| unescape_xml(m.as_str()))
}

// 去掉空行，每行去除行尾空白
fn compact_lines(text: &str, trim_start: bool) -> String {
    text.lines()
        .map(|line| if trim_start { line.trim() } else { line.trim_end() })
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_element(paragraph_type: &str, attrs: &str, text: &str) -> Option<ScriptElement> {
    let kind = match paragraph_type {
        "Scene Heading" => {
            let text = text.trim();
            let scene_number = attribute(&FDX_REGEX.number_attr, attrs).filter(|n| !n.trim().is_empty());
            let int_ext = HeadingParts::parse(text).int_ext;
            return Some(ScriptElement::new(ElementKind::SceneHeading { scene_number, int_ext }, text, 0));
        }
        "Character" => {
            let cue = CharacterCue::parse(text);
            let text = cue.text();
            if text.is_empty() {
                return None;
            }
            let kind = ElementKind::Character {
                character_name: cue.name,
                extension: cue.extension,
                dual: None,
            };
            return Some(ScriptElement::new(kind, text, 0));
        }
        "Dialogue" => ElementKind::Dialogue,
        "Parenthetical" => ElementKind::Parenthetical,
        "Transition" => ElementKind::Transition,
        _ if attribute(&FDX_REGEX.alignment_attr, attrs).as_deref() == Some("Center") => ElementKind::Centered,
        // 未知类型降级为动作
        _ => ElementKind::Action,
    };

    let text = match kind {
        ElementKind::Action => compact_lines(text, false),
        ElementKind::Dialogue => compact_lines(text, true),
        _ => compact_lines(text, true).replace('\n', " "),
    };
    if text.is_empty() {
        return None;
    }
    Some(ScriptElement::new(kind, text, 0))
}

/// 读取 FDX 文档，转换为 Fountain 文本
pub fn import_fdx(xml: &str) -> Result<String, FdxError> {
    if !FDX_REGEX.root.is_match(xml) {
        return Err(FdxError::MissingRoot);
    }
    let body = FDX_REGEX.title_page.replace_all(xml, "");
    let content = FDX_REGEX
        .content
        .captures(&body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(FdxError::MissingContent)?;

    let mut elements: Vec<ScriptElement> = Vec::new();
    for paragraph in FDX_REGEX.paragraph.captures_iter(&content) {
        let attrs = paragraph.get(1).map_or("", |m| m.as_str());
        let inner = paragraph.get(2).map_or("", |m| m.as_str());
        let paragraph_type = attribute(&FDX_REGEX.type_attr, attrs).unwrap_or_default();
        let text: String = FDX_REGEX
            .text
            .captures_iter(inner)
            .filter_map(|c| c.get(1))
            .map(|m| unescape_xml(m.as_str()))
            .collect();

        if let Some(element) = to_element(&paragraph_type, attrs, &text) {
            // 相邻的对白段落合并
            match elements.last_mut() {
                Some(last) if last.kind == ElementKind::Dialogue && element.kind == ElementKind::Dialogue => {
                    last.text.push('\n');
                    last.text.push_str(&element.text);
                }
                _ => elements.push(element),
            }
        }
    }

    Ok(serialize_elements(&elements))
}
