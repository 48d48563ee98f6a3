pub mod script_element;
pub mod scene;
pub mod screenplay;
pub mod outline;
pub mod conf;

pub use script_element::{ScriptElement, ElementKind, DualSide, IntExt};
pub use scene::Scene;
pub use screenplay::{Screenplay, TitlePage};
pub use outline::{
    OutlineEntry,
    SceneId,
    BeatId,
    CharacterId,
    CharacterProfile,
    FountainRange,
    SceneStatus
};
pub use conf::Conf;
