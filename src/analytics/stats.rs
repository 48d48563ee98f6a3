use std::collections::{BTreeSet, HashMap};
use serde::{Deserialize, Serialize};
use crate::analytics::duration::{action_duration, dialogue_duration};
use crate::analytics::page_estimate::estimate_page_count;
use crate::models::{Conf, ElementKind, Screenplay};

/// 单个角色的对白数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDialogueCount {
    pub name: String,
    pub count: usize,
}

/// 剧本统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub page_count: usize,
    pub scene_count: usize,
    pub word_count: usize,
    /// 去重并排序的角色名
    pub characters: Vec<String>,
    /// 去重并排序的大写地点
    pub locations: Vec<String>,
    pub dialogue_count: usize,
    pub action_count: usize,
    /// 没有动作元素时为 0
    pub dialogue_to_action_ratio: f64,
    /// 按对白数降序，同数按名字升序
    pub character_dialogue_counts: Vec<CharacterDialogueCount>,
    /// 对白预估时长（秒）
    pub dialogue_duration: f64,
    /// 动作预估时长（秒）
    pub action_duration: f64,
}

impl Stats {
    /// 预估片长（秒）
    pub fn estimated_runtime(&self) -> f64 {
        self.dialogue_duration + self.action_duration
    }
}

pub fn analyze_with(screenplay: &Screenplay, conf: &Conf) -> Stats {
    let mut characters = BTreeSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut speaker: Option<&str> = None;
    let mut dialogue_count = 0;
    let mut action_count = 0;
    let mut word_count = 0;
    let mut dialogue_secs = 0.0;
    let mut action_secs = 0.0;

    for element in &screenplay.elements {
        match &element.kind {
            ElementKind::Character { character_name, .. } => {
                characters.insert(character_name.clone());
                speaker = Some(character_name.as_str());
            }
            ElementKind::Dialogue => {
                dialogue_count += 1;
                dialogue_secs += dialogue_duration(&element.clean_text(), conf);
                if let Some(name) = speaker {
                    *counts.entry(name.to_string()).or_insert(0) += 1;
                }
            }
            ElementKind::Action => {
                action_count += 1;
                action_secs += action_duration(&element.clean_text(), conf);
            }
            ElementKind::Parenthetical | ElementKind::DualDialogueBegin | ElementKind::DualDialogueEnd => {}
            _ => speaker = None,
        }

        if !matches!(
            element.kind,
            ElementKind::Boneyard | ElementKind::Note | ElementKind::Synopsis | ElementKind::Section { .. }
        ) {
            word_count += element.clean_text().split_whitespace().count();
        }
    }

    let locations: BTreeSet<String> = screenplay
        .scenes
        .iter()
        .map(|scene| scene.location.to_uppercase())
        .filter(|location| !location.is_empty())
        .collect();

    let dialogue_to_action_ratio = if action_count == 0 {
        0.0
    } else {
        dialogue_count as f64 / action_count as f64
    };

    let mut character_dialogue_counts: Vec<CharacterDialogueCount> = counts
        .into_iter()
        .map(|(name, count)| CharacterDialogueCount { name, count })
        .collect();
    character_dialogue_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    Stats {
        page_count: estimate_page_count(&screenplay.elements, conf),
        scene_count: screenplay.scenes.len(),
        word_count,
        characters: characters.into_iter().collect(),
        locations: locations.into_iter().collect(),
        dialogue_count,
        action_count,
        dialogue_to_action_ratio,
        character_dialogue_counts,
        dialogue_duration: dialogue_secs,
        action_duration: action_secs,
    }
}
