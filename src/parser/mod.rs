pub mod heading;
pub mod line_classifier;
pub mod fountain_parser;

pub use fountain_parser::{FountainParser, build_scenes};
pub use heading::HeadingParts;
