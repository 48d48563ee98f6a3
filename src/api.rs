//! 宿主程序调用的异步接口
//!
//! 核心流水线都是同步纯函数；这里负责把它们放到 tokio 的阻塞线程池里，
//! 并把结果转换成宿主方便使用的形式（JSON 字符串等）。

use crate::analytics::{analyze_with, Stats};
use crate::diff::{compute_patch_with, Patch};
use crate::error::FountainResult;
use crate::models::{CharacterProfile, Conf, OutlineEntry};
use crate::parser::FountainParser;
use crate::reconcile::{link_characters, reconcile_with, RandomSceneIds};
use crate::validator::{validate_with, Issue};

/// 解析Fountain文本，返回剧本的JSON
pub async fn parse_fountain_text(text: String, config: Option<Conf>) -> String {
    let parser = FountainParser::with_config(config.unwrap_or_default());
    let result = parser.parse(&text);

    serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
}

/// 解析并校验
pub async fn validate_text(text: String, config: Option<Conf>) -> Vec<Issue> {
    let conf = config.unwrap_or_default();
    let screenplay = FountainParser::with_config(conf.clone()).parse(&text);
    validate_with(&screenplay, &conf)
}

/// 解析并统计
pub async fn analyze_text(text: String, config: Option<Conf>) -> Stats {
    let conf = config.unwrap_or_default();
    let screenplay = FountainParser::with_config(conf.clone()).parse(&text);
    analyze_with(&screenplay, &conf)
}

/// 依次对相邻的两个版本计算补丁，各对之间并行
///
/// 返回 `revisions.len() - 1` 个结果，相同的相邻版本对应 None。
pub async fn compute_patches(revisions: Vec<String>, config: Option<Conf>) -> FountainResult<Vec<Option<Patch>>> {
    let conf = config.unwrap_or_default();
    let mut handles = Vec::new();

    for pair in revisions.windows(2) {
        let old = pair[0].clone();
        let new = pair[1].clone();
        let conf = conf.clone();
        handles.push(tokio::task::spawn_blocking(move || compute_patch_with(&old, &new, &conf)));
    }

    let mut patches = Vec::with_capacity(handles.len());
    for handle in handles {
        patches.push(handle.await?);
    }
    Ok(patches)
}

/// 解析文本，与已有大纲对账，再关联角色档案
pub async fn reconcile_outline(
    text: String,
    existing: Vec<OutlineEntry>,
    profiles: Vec<CharacterProfile>,
    config: Option<Conf>,
) -> FountainResult<Vec<OutlineEntry>> {
    let conf = config.unwrap_or_default();
    let entries = tokio::task::spawn_blocking(move || {
        let screenplay = FountainParser::with_config(conf.clone()).parse(&text);
        let reconciled = reconcile_with(&screenplay.scenes, &existing, &conf, &mut RandomSceneIds);
        link_characters(&reconciled.entries, &screenplay.scenes, &profiles)
    })
    .await?;

    Ok(entries)
}
