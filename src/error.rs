use thiserror::Error;
use crate::diff::PatchError;
use crate::fdx::FdxError;

/// 库级错误
///
/// 核心流水线（解析、序列化、校验、统计、差分、对账）本身不会失败，
/// 这里只覆盖外围操作：读文件、读配置、JSON 编解码、补丁回放、FDX 导入。
#[derive(Error, Debug)]
pub enum FountainError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置文件错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("FDX错误: {0}")]
    Fdx(#[from] FdxError),

    #[error("补丁错误: {0}")]
    Patch(#[from] PatchError),

    #[error("后台任务失败: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type FountainResult<T> = Result<T, FountainError>;
