pub mod rules;

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::{Conf, Screenplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 文档不合规
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// 格式问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 问题所在行（从 1 开始）
    pub line: usize,
    pub severity: Severity,
    /// 规则名，如 `dialogue-without-character`
    pub rule: String,
    pub message: String,
}

impl Issue {
    pub(crate) fn new(line: usize, severity: Severity, rule: &str, message: impl Into<String>) -> Self {
        Issue {
            line,
            severity,
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// 使用默认配置校验剧本
pub fn validate(screenplay: &Screenplay) -> Vec<Issue> {
    validate_with(screenplay, &Conf::default())
}

/// 校验剧本，问题按行号排序（同一行内保持规则顺序）
pub fn validate_with(screenplay: &Screenplay, conf: &Conf) -> Vec<Issue> {
    let mut issues = Vec::new();
    for rule in rules::ALL_RULES {
        rule(screenplay, conf, &mut issues);
    }
    issues.sort_by_key(|issue| issue.line);
    issues
}

/// 没有 error 级别的问题即为有效
pub fn is_valid(issues: &[Issue]) -> bool {
    !issues.iter().any(|issue| issue.severity == Severity::Error)
}
