use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::error::FountainResult;
use crate::utils::BLOCK_REGEX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HunkKind {
    Add,
    Remove,
    Modify,
}

/// 一段连续的改动区域
///
/// 行号从 0 开始，区间左闭右开；`text` 是新文本中对应的行（含换行符）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    #[serde(rename = "type")]
    pub kind: HunkKind,
    pub original_start: usize,
    pub original_end: usize,
    pub modified_start: usize,
    pub modified_end: usize,
    pub text: String,
}

impl Hunk {
    pub(crate) fn new(original: (usize, usize), modified: (usize, usize), text: String) -> Self {
        let kind = match (original.1 > original.0, modified.1 > modified.0) {
            (false, _) => HunkKind::Add,
            (true, false) => HunkKind::Remove,
            (true, true) => HunkKind::Modify,
        };
        Hunk {
            kind,
            original_start: original.0,
            original_end: original.1,
            modified_start: modified.0,
            modified_end: modified.1,
            text,
        }
    }
}

/// 补丁：按原文位置升序排列的改动区域与摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    pub hunks: Vec<Hunk>,
    pub summary: String,
}

impl Patch {
    /// 序列化为单行 JSON（文本中的换行会被转义）
    pub fn to_json_line(&self) -> FountainResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_line(line: &str) -> FountainResult<Patch> {
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

/// 回放补丁失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("第 {index} 个区域与前一个区域重叠或顺序错误")]
    OutOfOrder { index: usize },

    #[error("第 {index} 个区域越界：结束行 {end}，原文共 {len} 行")]
    OutOfBounds { index: usize, end: usize, len: usize },

    #[error("第 {index} 个区域的起止行无效")]
    InvalidRange { index: usize },
}

/// 在旧文本上按顺序回放补丁，得到新文本
pub fn apply_patch(old: &str, patch: &Patch) -> Result<String, PatchError> {
    let lines: Vec<&str> = old.split_inclusive('\n').collect();
    let mut out = String::with_capacity(old.len());
    let mut cursor = 0;

    for (index, hunk) in patch.hunks.iter().enumerate() {
        if hunk.original_start > hunk.original_end || hunk.modified_start > hunk.modified_end {
            return Err(PatchError::InvalidRange { index });
        }
        if hunk.original_end > lines.len() {
            return Err(PatchError::OutOfBounds {
                index,
                end: hunk.original_end,
                len: lines.len(),
            });
        }
        if hunk.original_start < cursor {
            return Err(PatchError::OutOfOrder { index });
        }

        out.extend(lines[cursor..hunk.original_start].iter().copied());
        out.push_str(&hunk.text);
        cursor = hunk.original_end;
    }
    out.extend(lines[cursor..].iter().copied());

    Ok(out)
}

#[derive(Debug, Default)]
struct ChangeCounts {
    added: usize,
    removed: usize,
    changed: usize,
}

impl ChangeCounts {
    fn record(&mut self, old: usize, new: usize) {
        let common = old.min(new);
        self.changed += common;
        self.added += new - common;
        self.removed += old - common;
    }
}

fn is_heading_line(line: &str) -> bool {
    BLOCK_REGEX.scene_heading.is_match(line.trim())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// 生成人类可读的摘要，如 "Added 2 lines, changed 1 scene heading"
pub(crate) fn summarize(old_lines: &[&str], new_lines: &[&str], hunks: &[Hunk]) -> String {
    let mut lines = ChangeCounts::default();
    let mut headings = ChangeCounts::default();

    for hunk in hunks {
        let old = &old_lines[hunk.original_start..hunk.original_end];
        let new = &new_lines[hunk.modified_start..hunk.modified_end];
        let old_headings = old.iter().filter(|l| is_heading_line(l)).count();
        let new_headings = new.iter().filter(|l| is_heading_line(l)).count();
        headings.record(old_headings, new_headings);
        lines.record(old.len() - old_headings, new.len() - new_headings);
    }

    let mut parts = Vec::new();
    for (verb, count, noun) in [
        ("added", lines.added, "line"),
        ("removed", lines.removed, "line"),
        ("changed", lines.changed, "line"),
        ("added", headings.added, "scene heading"),
        ("removed", headings.removed, "scene heading"),
        ("changed", headings.changed, "scene heading"),
    ] {
        if count > 0 {
            parts.push(format!("{} {}", verb, plural(count, noun)));
        }
    }

    if parts.is_empty() {
        return "No changes".to_string();
    }

    let summary = parts.join(", ");
    let mut chars = summary.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => summary,
    }
}
