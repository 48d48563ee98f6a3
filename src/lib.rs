pub mod models;
pub mod utils;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod validator;
pub mod analytics;
pub mod diff;
pub mod reconcile;
pub mod fdx;
pub mod api;

pub use models::{
    ScriptElement,
    ElementKind,
    DualSide,
    IntExt,
    Scene,
    Screenplay,
    TitlePage,
    OutlineEntry,
    SceneId,
    BeatId,
    CharacterId,
    CharacterProfile,
    FountainRange,
    SceneStatus,
    Conf
};

pub use error::{FountainError, FountainResult};

pub use parser::FountainParser;

pub use serializer::{serialize, serialize_elements};

pub use validator::{validate, validate_with, is_valid, Issue, Severity};

pub use analytics::{analyze, analyze_with, Stats, CharacterDialogueCount};

pub use diff::{
    compute_patch,
    compute_patch_with,
    apply_patch,
    Patch,
    Hunk,
    HunkKind,
    PatchError
};

pub use reconcile::{
    reconcile,
    reconcile_with,
    link_characters,
    Reconciliation,
    SceneMatch,
    MatchKind,
    SceneIdSource,
    RandomSceneIds,
    SequentialSceneIds
};

pub use fdx::{export_fdx, import_fdx, FdxError};

/// 解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
///
/// # Returns
///
/// 解析出的剧本；解析不会失败，无法识别的行降级为动作
pub fn parse(script: &str) -> Screenplay {
    FountainParser::new().parse(script)
}
