use std::collections::HashSet;
use crate::models::{Conf, OutlineEntry, Scene};
use crate::parser::HeadingParts;
use crate::utils::normalize_heading;

/// 匹配层级，按优先级排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    SceneNumber,
    ExactHeading,
    FuzzyHeading,
    Position,
    /// 没有匹配，新建条目
    Created,
}

impl MatchKind {
    pub fn name(&self) -> &'static str {
        match self {
            MatchKind::SceneNumber => "scene_number",
            MatchKind::ExactHeading => "exact_heading",
            MatchKind::FuzzyHeading => "fuzzy_heading",
            MatchKind::Position => "position",
            MatchKind::Created => "created",
        }
    }
}

// 大写字母数字词集合
fn heading_tokens(heading: &str) -> HashSet<String> {
    heading
        .to_uppercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// 地点相同时的加分
fn location_bonus(a: &str, b: &str, conf: &Conf) -> f64 {
    let location = HeadingParts::location_key(a);
    if !location.is_empty() && location == HeadingParts::location_key(b) {
        conf.location_match_bonus
    } else {
        0.0
    }
}

/// 标题相似度：词集合的 Dice 系数，地点相同时加分，上限 1.0
///
/// 只用于模糊标题匹配。
pub fn heading_similarity(a: &str, b: &str, conf: &Conf) -> f64 {
    let left = heading_tokens(a);
    let right = heading_tokens(b);
    if left.is_empty() && right.is_empty() {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    let score = 2.0 * shared as f64 / (left.len() + right.len()) as f64;
    (score + location_bonus(a, b, conf)).min(1.0)
}

/// 标题重合度：词集合的 Jaccard 系数，地点相同时加分，上限 1.0
///
/// 位置辅助匹配用它把关，比 Dice 更严。
pub fn heading_overlap(a: &str, b: &str, conf: &Conf) -> f64 {
    let left = heading_tokens(a);
    let right = heading_tokens(b);
    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    let score = shared as f64 / union as f64;
    (score + location_bonus(a, b, conf)).min(1.0)
}

/// 候选条目：按旧排序排列，附带旧的相对位置
pub(crate) struct Candidate<'a> {
    pub entry: &'a OutlineEntry,
    /// 只有带行范围的条目才有位置
    pub position: Option<f64>,
    pub matched: bool,
}

pub(crate) fn candidates(existing: &[OutlineEntry]) -> Vec<Candidate<'_>> {
    let mut prior: Vec<&OutlineEntry> = existing.iter().collect();
    prior.sort_by_key(|entry| entry.sort_index);

    let positioned = prior.iter().filter(|e| e.fountain_range.is_some()).count();
    let mut rank = 0;
    prior
        .into_iter()
        .map(|entry| {
            let position = entry.fountain_range.map(|_| {
                let pos = relative_position(rank, positioned);
                rank += 1;
                pos
            });
            Candidate {
                entry,
                position,
                matched: false,
            }
        })
        .collect()
}

pub(crate) fn relative_position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// 按优先级为场景寻找未匹配的条目
pub(crate) fn find_match(
    scene: &Scene,
    scene_position: f64,
    pool: &[Candidate<'_>],
    conf: &Conf,
) -> Option<(usize, MatchKind)> {
    let open = || pool.iter().enumerate().filter(|(_, c)| !c.matched);

    if let Some(number) = &scene.scene_number {
        if let Some((idx, _)) = open().find(|(_, c)| c.entry.scene_number.as_ref() == Some(number)) {
            return Some((idx, MatchKind::SceneNumber));
        }
    }

    let heading = normalize_heading(&scene.heading);
    if let Some((idx, _)) = open().find(|(_, c)| normalize_heading(&c.entry.heading) == heading) {
        return Some((idx, MatchKind::ExactHeading));
    }

    // 同分取旧排序靠前者
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in open() {
        let score = heading_similarity(&scene.heading, &candidate.entry.heading, conf);
        if score >= conf.fuzzy_match_threshold && best.map_or(true, |(_, s)| score > s) {
            best = Some((idx, score));
        }
    }
    if let Some((idx, _)) = best {
        return Some((idx, MatchKind::FuzzyHeading));
    }

    let mut best: Option<(usize, f64, f64)> = None;
    for (idx, candidate) in open() {
        let position = match candidate.position {
            Some(position) => position,
            None => continue,
        };
        let distance = (position - scene_position).abs();
        if distance > conf.position_tolerance {
            continue;
        }
        let score = heading_overlap(&scene.heading, &candidate.entry.heading, conf);
        if score < conf.position_min_similarity {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_score, best_distance)) => {
                score > best_score || (score == best_score && distance < best_distance)
            }
        };
        if better {
            best = Some((idx, score, distance));
        }
    }
    best.map(|(idx, _, _)| (idx, MatchKind::Position))
}
