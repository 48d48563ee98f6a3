pub mod page_estimate;
pub mod duration;
pub mod stats;

pub use page_estimate::{estimate_line_count, estimate_page_count, wrapped_line_count};
pub use stats::{analyze_with, CharacterDialogueCount, Stats};

use crate::models::{Conf, Screenplay};

/// 使用默认配置统计剧本
pub fn analyze(screenplay: &Screenplay) -> Stats {
    analyze_with(screenplay, &Conf::default())
}
