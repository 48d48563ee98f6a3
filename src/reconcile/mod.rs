pub mod matcher;
pub mod scene_id;

pub use matcher::{heading_overlap, heading_similarity, MatchKind};
pub use scene_id::{RandomSceneIds, SceneIdSource, SequentialSceneIds};

use std::collections::HashSet;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::models::{
    CharacterId,
    CharacterProfile,
    Conf,
    FountainRange,
    OutlineEntry,
    Scene,
    SceneId,
    SceneStatus
};
use matcher::{candidates, find_match, relative_position};

/// 单个场景的匹配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMatch {
    /// 场景在本次解析结果中的下标
    pub scene_index: usize,
    pub id: SceneId,
    pub kind: MatchKind,
}

/// 对账结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// 全部条目，sort_index 从 0 连续编号
    pub entries: Vec<OutlineEntry>,
    /// 每个解析场景一条，按文档顺序
    pub matches: Vec<SceneMatch>,
}

/// 使用默认配置与随机标识对账
pub fn reconcile(scenes: &[Scene], existing: &[OutlineEntry]) -> Vec<OutlineEntry> {
    reconcile_with(scenes, existing, &Conf::default(), &mut RandomSceneIds).entries
}

/// 把本次解析出的场景映射到已有的大纲条目上
///
/// 按文档顺序逐个场景依次尝试：场景编号、规范化标题、模糊标题、位置辅助，
/// 都失败则新建条目。未被匹配的旧条目不会删除，只清空行范围，
/// 已写成的降级为计划中，排在最后并保持原有相对顺序。
pub fn reconcile_with(
    scenes: &[Scene],
    existing: &[OutlineEntry],
    conf: &Conf,
    ids: &mut dyn SceneIdSource,
) -> Reconciliation {
    let mut pool = candidates(existing);
    let mut taken: HashSet<SceneId> = existing.iter().map(|e| e.id.clone()).collect();
    let mut entries = Vec::with_capacity(existing.len() + scenes.len());
    let mut matches = Vec::with_capacity(scenes.len());

    for (scene_index, scene) in scenes.iter().enumerate() {
        let position = relative_position(scene_index, scenes.len());
        let (entry, kind) = match find_match(scene, position, &pool, conf) {
            Some((idx, kind)) => {
                pool[idx].matched = true;
                (drafted(pool[idx].entry.clone(), scene), kind)
            }
            None => {
                let id = fresh_id(ids, &mut taken);
                let entry = OutlineEntry::planned(id, &scene.heading);
                (drafted(entry, scene), MatchKind::Created)
            }
        };

        debug!(scene = scene_index, id = entry.id.as_str(), tier = kind.name(); "场景匹配");
        matches.push(SceneMatch {
            scene_index,
            id: entry.id.clone(),
            kind,
        });
        entries.push(entry);
    }

    for candidate in pool.iter().filter(|c| !c.matched) {
        let mut entry = candidate.entry.clone();
        entry.fountain_range = None;
        if entry.status == SceneStatus::Drafted {
            entry.status = SceneStatus::Planned;
        }
        debug!(id = entry.id.as_str(); "条目孤立");
        entries.push(entry);
    }

    for (sort_index, entry) in entries.iter_mut().enumerate() {
        entry.sort_index = sort_index;
    }

    Reconciliation { entries, matches }
}

// 用场景的解析结果覆盖条目的正文字段，保留摘要、节拍与角色
fn drafted(mut entry: OutlineEntry, scene: &Scene) -> OutlineEntry {
    entry.heading = scene.heading.clone();
    entry.int_ext = scene.int_ext;
    entry.location = scene.location.clone();
    entry.time_of_day = scene.time_of_day.clone();
    entry.scene_number = scene.scene_number.clone();
    entry.fountain_range = Some(FountainRange {
        start_line: scene.start_line,
        end_line: scene.end_line,
    });
    entry.status = SceneStatus::Drafted;
    entry
}

fn fresh_id(ids: &mut dyn SceneIdSource, taken: &mut HashSet<SceneId>) -> SceneId {
    loop {
        let id = ids.next_id();
        if taken.insert(id.clone()) {
            return id;
        }
    }
}

/// 按名字（不区分大小写，含别名）把场景中的角色关联到角色档案
///
/// 条目通过行范围起点对应到场景；已有的关联保留，新找到的追加在后。
/// 关联只增不减：角色不再出现在场景里时不会被移除，需要时由调用方清理。
pub fn link_characters(
    entries: &[OutlineEntry],
    scenes: &[Scene],
    profiles: &[CharacterProfile],
) -> Vec<OutlineEntry> {
    entries
        .iter()
        .map(|entry| {
            let mut entry = entry.clone();
            let scene = entry
                .fountain_range
                .and_then(|range| scenes.iter().find(|s| s.start_line == range.start_line));
            if let Some(scene) = scene {
                for name in &scene.characters {
                    if let Some(id) = find_profile(profiles, name) {
                        if !entry.character_ids.contains(id) {
                            entry.character_ids.push(id.clone());
                        }
                    }
                }
            }
            entry
        })
        .collect()
}

fn find_profile<'a>(profiles: &'a [CharacterProfile], name: &str) -> Option<&'a CharacterId> {
    let name = name.trim().to_lowercase();
    profiles
        .iter()
        .find(|p| {
            p.name.trim().to_lowercase() == name
                || p.aliases.iter().any(|a| a.trim().to_lowercase() == name)
        })
        .map(|p| &p.id)
}
