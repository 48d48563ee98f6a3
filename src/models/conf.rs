use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::FountainResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 每页可容纳的行数
    pub lines_per_page: usize,
    /// 动作段落每行字符数（用于折行估算）
    pub action_chars_per_line: usize,
    /// 对白每行字符数（用于折行估算）
    pub dialogue_chars_per_line: usize,
    /// 对白中每字符耗时预估(不含标点)
    pub dial_sec_per_char: f64,
    /// 对白中每个短标点耗时预估(逗号顿号等)
    pub dial_sec_per_punc_short: f64,
    /// 对白中每个长标点耗时预估(句号问号等)
    pub dial_sec_per_punc_long: f64,
    /// action文本中每字符转化成影片时长预估(不含标点)
    pub action_sec_per_char: f64,
    /// 模糊标题匹配的接受阈值
    pub fuzzy_match_threshold: f64,
    /// 地点相同时的加分
    pub location_match_bonus: f64,
    /// 位置辅助匹配允许的相对位置偏差
    pub position_tolerance: f64,
    /// 位置辅助匹配要求的最低标题相似度
    pub position_min_similarity: f64,
    /// 单段对白超过该行数时给出提示
    pub max_dialogue_lines: usize,
    /// Myers 差分的最大编辑距离，超过后整体替换
    pub max_edit_distance: usize,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            lines_per_page: 56,
            action_chars_per_line: 60,
            dialogue_chars_per_line: 35,
            dial_sec_per_char: 0.3,
            dial_sec_per_punc_short: 0.3,
            dial_sec_per_punc_long: 0.75,
            action_sec_per_char: 0.4,
            fuzzy_match_threshold: 0.80,
            location_match_bonus: 0.15,
            position_tolerance: 0.15,
            position_min_similarity: 0.50,
            max_dialogue_lines: 12,
            max_edit_distance: 1024,
        }
    }
}

impl Conf {
    /// 从 TOML 文本读取配置，缺省字段使用默认值
    pub fn from_toml_str(text: &str) -> FountainResult<Conf> {
        Ok(toml::from_str(text)?)
    }

    /// 从 TOML 文件读取配置
    pub fn load(path: impl AsRef<Path>) -> FountainResult<Conf> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
