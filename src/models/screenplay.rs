use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::models::scene::Scene;
use crate::models::script_element::ScriptElement;

/// 标题页，键不区分大小写
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitlePage(BTreeMap<String, String>);

impl TitlePage {
    pub fn new() -> Self {
        TitlePage(BTreeMap::new())
    }

    /// 规范化键：小写，连续空白合并为单个空格
    pub fn normalize_key(key: &str) -> String {
        key.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&Self::normalize_key(key)).map(|v| v.as_str())
    }

    /// 写入字段；同名字段重复出现时以换行追加
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let key = Self::normalize_key(key);
        match self.0.get_mut(&key) {
            Some(existing) if !existing.is_empty() && !value.is_empty() => {
                existing.push('\n');
                existing.push_str(&value);
            }
            Some(existing) if existing.is_empty() => *existing = value,
            Some(_) => {}
            None => {
                self.0.insert(key, value);
            }
        }
    }

    pub(crate) fn value_mut(&mut self, key: &str) -> Option<&mut String> {
        self.0.get_mut(&Self::normalize_key(key))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// 解析结果：完整剧本
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenplay {
    pub title_page: TitlePage,
    /// 按文档顺序排列的全部元素
    pub elements: Vec<ScriptElement>,
    /// 由 elements 派生的场景视图
    pub scenes: Vec<Scene>,
    /// 估算页数
    pub page_count: usize,
}

impl Screenplay {
    /// 结构等价：标题页相同，元素序列的类型与文本相同
    pub fn same_content(&self, other: &Screenplay) -> bool {
        self.title_page == other.title_page
            && self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .zip(other.elements.iter())
                .all(|(a, b)| a.same_content(b))
    }
}
