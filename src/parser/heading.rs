use crate::models::IntExt;
use crate::utils::HEADING_REGEX;

/// 场景标题拆分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingParts {
    pub int_ext: IntExt,
    /// 去掉内外景前缀与时间后缀的地点
    pub location: String,
    pub time_of_day: String,
}

impl HeadingParts {
    /// 拆分场景标题，如 `INT. KITCHEN - DAY` => (Int, "KITCHEN", "DAY")
    ///
    /// 时间取最后一个破折号之后的部分，破折号前必须有空白，
    /// 这样 `MOTHER-IN-LAW'S HOUSE` 之类的连字符地名不会被截断。
    pub fn parse(heading: &str) -> HeadingParts {
        let heading = heading.trim();
        let (int_ext, rest) = match HEADING_REGEX.prefix.captures(heading) {
            Some(captures) => {
                let prefix = captures.get(1).map_or("", |m| m.as_str()).to_uppercase();
                let int_ext = if prefix.contains('/') {
                    IntExt::IntExt
                } else if prefix.starts_with("INT") {
                    IntExt::Int
                } else {
                    IntExt::Ext
                };
                let end = captures.get(0).map_or(0, |m| m.end());
                (int_ext, &heading[end..])
            }
            None => (IntExt::None, heading),
        };

        let (location, time_of_day) = match HEADING_REGEX.time_split.captures(rest) {
            Some(captures) => (
                captures.get(1).map_or("", |m| m.as_str()).trim().to_string(),
                captures.get(2).map_or("", |m| m.as_str()).trim().to_string(),
            ),
            None => (rest.trim().to_string(), String::new()),
        };

        HeadingParts {
            int_ext,
            location,
            time_of_day,
        }
    }

    /// 地点的比较键：大写并合并空白
    pub fn location_key(heading: &str) -> String {
        crate::utils::normalize_heading(&Self::parse(heading).location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_standard_heading() {
        let parts = HeadingParts::parse("INT. KITCHEN - DAY");
        assert_eq!(parts.int_ext, IntExt::Int);
        assert_eq!(parts.location, "KITCHEN");
        assert_eq!(parts.time_of_day, "DAY");
    }

    #[test]
    fn uses_last_dash_for_time() {
        let parts = HeadingParts::parse("EXT. HOUSE - BACKYARD - NIGHT");
        assert_eq!(parts.int_ext, IntExt::Ext);
        assert_eq!(parts.location, "HOUSE - BACKYARD");
        assert_eq!(parts.time_of_day, "NIGHT");
    }

    #[test]
    fn keeps_hyphenated_locations() {
        let parts = HeadingParts::parse("int./ext. mother-in-law's car");
        assert_eq!(parts.int_ext, IntExt::IntExt);
        assert_eq!(parts.location, "mother-in-law's car");
        assert_eq!(parts.time_of_day, "");
    }

    #[test]
    fn forced_heading_has_no_prefix() {
        let parts = HeadingParts::parse("FLASHBACK - 1985");
        assert_eq!(parts.int_ext, IntExt::None);
        assert_eq!(parts.location, "FLASHBACK");
        assert_eq!(parts.time_of_day, "1985");
    }
}
