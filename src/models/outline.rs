use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::script_element::IntExt;

/// 场景的持久标识，一经分配不再改变
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        SceneId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 节拍（故事结构）标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeatId(String);

impl BeatId {
    pub fn new(id: impl Into<String>) -> Self {
        BeatId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 角色档案标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        CharacterId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 场景在正文中的行范围（从 1 开始，含首尾）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FountainRange {
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStatus {
    /// 只存在于大纲，尚未写入正文
    Planned,
    /// 正文中存在对应场景
    Drafted,
}

/// 大纲条目：场景的持久记录，由对账引擎维护
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub id: SceneId,
    pub heading: String,
    pub int_ext: IntExt,
    pub location: String,
    pub time_of_day: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub beat_id: Option<BeatId>,
    #[serde(default)]
    pub character_ids: Vec<CharacterId>,
    pub sort_index: usize,
    pub fountain_range: Option<FountainRange>,
    #[serde(default)]
    pub scene_number: Option<String>,
    pub status: SceneStatus,
}

impl OutlineEntry {
    /// 创建一个只存在于大纲中的计划场景
    pub fn planned(id: SceneId, heading: &str) -> Self {
        let parts = crate::parser::heading::HeadingParts::parse(heading);
        OutlineEntry {
            id,
            heading: heading.trim().to_string(),
            int_ext: parts.int_ext,
            location: parts.location,
            time_of_day: parts.time_of_day,
            summary: String::new(),
            beat_id: None,
            character_ids: Vec::new(),
            sort_index: 0,
            fountain_range: None,
            scene_number: None,
            status: SceneStatus::Planned,
        }
    }

    /// 是否已被孤立（正文已不存在）
    pub fn is_orphaned(&self) -> bool {
        self.fountain_range.is_none()
    }
}

/// 角色档案，供 link_characters 按名字关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}
