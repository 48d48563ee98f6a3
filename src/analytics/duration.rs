use crate::models::Conf;
use crate::utils::DURATION_REGEX;

// 去除空格、标点和特殊字符
fn countable_chars(text: &str) -> usize {
    DURATION_REGEX.countable.replace_all(text, "").chars().count()
}

/// 动作描述转化为画面的时长（秒）
pub fn action_duration(text: &str, conf: &Conf) -> f64 {
    countable_chars(text) as f64 * conf.action_sec_per_char
}

/// 对白时长（秒）：字符耗时加标点停顿
pub fn dialogue_duration(text: &str, conf: &Conf) -> f64 {
    let mut duration = countable_chars(text) as f64 * conf.dial_sec_per_char;

    for cap in DURATION_REGEX.punctuation.captures_iter(text) {
        if cap.get(1).is_some() {
            duration += conf.dial_sec_per_punc_long;
        } else if cap.get(2).is_some() {
            duration += conf.dial_sec_per_punc_short;
        }
    }

    duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_counts_pauses() {
        let conf = Conf::default();
        // 5 个字符 + 1 个短停顿 + 1 个长停顿
        let secs = dialogue_duration("Hi, you.", &conf);
        assert!((secs - (5.0 * 0.3 + 0.3 + 0.75)).abs() < 1e-9);
    }

    #[test]
    fn action_ignores_punctuation() {
        let conf = Conf::default();
        assert!((action_duration("他走了。", &conf) - 3.0 * 0.4).abs() < 1e-9);
    }
}
