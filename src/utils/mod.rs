pub mod fountain_constants;

pub use fountain_constants::{FountainConstants, BLOCK_REGEX, HEADING_REGEX, DURATION_REGEX};

/// 合并连续空白为单个空格并去除首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 标题比较用的规范化：大写 + 空白合并
pub fn normalize_heading(text: &str) -> String {
    normalize_whitespace(text).to_uppercase()
}

/// 检查文本是否含小写字母
pub fn has_lowercase(text: &str) -> bool {
    text.chars().any(|c| c.is_lowercase())
}

/// 首字母大写，用于输出标题页字段名
pub fn title_case(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_normalization() {
        assert_eq!(normalize_heading("  int.  kitchen -   day "), "INT. KITCHEN - DAY");
    }

    #[test]
    fn title_case_keys() {
        assert_eq!(title_case("draft date"), "Draft Date");
        assert_eq!(title_case("title"), "Title");
    }
}
