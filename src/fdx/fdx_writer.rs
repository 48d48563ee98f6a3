use crate::models::{ElementKind, Screenplay, ScriptElement};

pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// 元素对应的段落类型；结构与元信息类元素不输出
fn paragraph_type(kind: &ElementKind) -> Option<&'static str> {
    match kind {
        ElementKind::SceneHeading { .. } => Some("Scene Heading"),
        ElementKind::Action | ElementKind::Centered | ElementKind::Lyric => Some("Action"),
        ElementKind::Character { .. } => Some("Character"),
        ElementKind::Dialogue => Some("Dialogue"),
        ElementKind::Parenthetical => Some("Parenthetical"),
        ElementKind::Transition => Some("Transition"),
        _ => None,
    }
}

fn write_paragraph(out: &mut String, element: &ScriptElement, paragraph_type: &str) {
    out.push_str(&format!("    <Paragraph Type=\"{}\"", paragraph_type));
    if let ElementKind::SceneHeading { scene_number: Some(number), .. } = &element.kind {
        out.push_str(&format!(" Number=\"{}\"", escape_xml(number)));
    }
    if element.kind == ElementKind::Centered {
        out.push_str(" Alignment=\"Center\"");
    }
    out.push_str(">\n");
    out.push_str(&format!("      <Text>{}</Text>\n", escape_xml(&element.text)));
    out.push_str("    </Paragraph>\n");
}

/// 导出为 Final Draft XML
pub fn export_fdx(screenplay: &Screenplay) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n");
    out.push_str("<FinalDraft DocumentType=\"Script\" Template=\"No\" Version=\"5\">\n");
    out.push_str("  <Content>\n");

    for element in &screenplay.elements {
        if let Some(paragraph_type) = paragraph_type(&element.kind) {
            write_paragraph(&mut out, element, paragraph_type);
        }
    }

    out.push_str("  </Content>\n");
    out.push_str("</FinalDraft>\n");
    out
}
