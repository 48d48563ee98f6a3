pub mod myers;
pub mod patch;

pub use patch::{apply_patch, Hunk, HunkKind, Patch, PatchError};

use log::{debug, warn};
use crate::models::Conf;
use myers::Edit;

/// 使用默认配置计算补丁
pub fn compute_patch(old: &str, new: &str) -> Option<Patch> {
    compute_patch_with(old, new, &Conf::default())
}

/// 计算把 old 变成 new 的逐行补丁，两者相同时返回 None
pub fn compute_patch_with(old: &str, new: &str, conf: &Conf) -> Option<Patch> {
    if old == new {
        return None;
    }

    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    // 去掉公共前后缀，只对中间部分做差分
    let prefix = old_lines
        .iter()
        .zip(new_lines.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old_lines[prefix..]
        .iter()
        .rev()
        .zip(new_lines[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old_lines[prefix..old_lines.len() - suffix];
    let new_mid = &new_lines[prefix..new_lines.len() - suffix];

    let hunks = match myers::diff(old_mid, new_mid, conf.max_edit_distance) {
        Some(edits) => group_hunks(&edits, prefix, &new_lines),
        None => {
            warn!(
                old_lines = old_mid.len(),
                new_lines = new_mid.len(),
                limit = conf.max_edit_distance;
                "编辑距离超过上限，整体替换中间区域"
            );
            vec![Hunk::new(
                (prefix, prefix + old_mid.len()),
                (prefix, prefix + new_mid.len()),
                new_mid.concat(),
            )]
        }
    };

    debug!(hunks = hunks.len(), common_prefix = prefix, common_suffix = suffix; "差分完成");

    let summary = patch::summarize(&old_lines, &new_lines, &hunks);
    Some(Patch { hunks, summary })
}

// 把连续的插入/删除合并为一个区域
fn group_hunks(edits: &[Edit], offset: usize, new_lines: &[&str]) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let (mut i, mut j) = (offset, offset);
    let mut idx = 0;

    while idx < edits.len() {
        if edits[idx] == Edit::Equal {
            i += 1;
            j += 1;
            idx += 1;
            continue;
        }

        let (start_i, start_j) = (i, j);
        while idx < edits.len() && edits[idx] != Edit::Equal {
            match edits[idx] {
                Edit::Delete => i += 1,
                Edit::Insert => j += 1,
                Edit::Equal => {}
            }
            idx += 1;
        }
        hunks.push(Hunk::new((start_i, i), (start_j, j), new_lines[start_j..j].concat()));
    }

    hunks
}
