pub mod fountain_writer;

pub use fountain_writer::FountainWriter;

use crate::models::{Screenplay, ScriptElement};

/// 把剧本写回 Fountain 文本（含标题页）
pub fn serialize(screenplay: &Screenplay) -> String {
    let mut writer = FountainWriter::new();
    writer.write_title_page(&screenplay.title_page);
    writer.write_elements(&screenplay.elements);
    writer.finish()
}

/// 只写元素序列，不含标题页
pub fn serialize_elements(elements: &[ScriptElement]) -> String {
    let mut writer = FountainWriter::new();
    writer.write_elements(elements);
    writer.finish()
}
