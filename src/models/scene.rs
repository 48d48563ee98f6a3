use serde::{Deserialize, Serialize};
use crate::models::script_element::{IntExt, ScriptElement};

/// 场景：从一个场景标题到下一个场景标题之前的连续元素
///
/// 每次解析都会重新生成，不持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub heading: String,
    pub int_ext: IntExt,
    pub location: String,
    pub time_of_day: String,
    pub scene_number: Option<String>,
    /// 场景标题所在行（从 1 开始）
    pub start_line: usize,
    /// 场景最后一个元素的结束行（含）
    pub end_line: usize,
    /// 场景内说过话的角色，按首次出现排序
    pub characters: Vec<String>,
    pub elements: Vec<ScriptElement>,
}

impl Scene {
    /// 场景内除标题外是否还有可见内容
    pub fn is_empty(&self) -> bool {
        !self
            .elements
            .iter()
            .skip(1)
            .any(|e| !e.kind.is_marker())
    }
}
