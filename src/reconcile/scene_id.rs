use uuid::Uuid;
use crate::models::SceneId;

/// 新场景标识的来源
pub trait SceneIdSource {
    fn next_id(&mut self) -> SceneId;
}

/// `sc_` 加 12 位十六进制随机串
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSceneIds;

impl SceneIdSource for RandomSceneIds {
    fn next_id(&mut self) -> SceneId {
        let raw = Uuid::new_v4().simple().to_string();
        SceneId::new(format!("sc_{}", &raw[..12]))
    }
}

/// 顺序编号 `sc_0001`、`sc_0002`……，用于测试与回放
#[derive(Debug, Clone)]
pub struct SequentialSceneIds {
    next: usize,
}

impl SequentialSceneIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: usize) -> Self {
        SequentialSceneIds { next }
    }
}

impl Default for SequentialSceneIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneIdSource for SequentialSceneIds {
    fn next_id(&mut self) -> SceneId {
        let id = SceneId::new(format!("sc_{:04}", self.next));
        self.next += 1;
        id
    }
}
