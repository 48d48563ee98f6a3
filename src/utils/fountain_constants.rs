use lazy_static::lazy_static;
use regex::Regex;

pub struct FountainConstants;

impl FountainConstants {
    /// 角色名与转场行的最大字符数，更长的全大写行按动作处理
    pub const MAX_SHORT_LINE_CHARS: usize = 40;

    /// 标题页常用字段，按惯用的书写顺序排列
    pub fn title_keys() -> &'static [&'static str] {
        &[
            "title",
            "credit",
            "author",
            "authors",
            "source",
            "draft date",
            "date",
            "contact",
            "contact info",
            "revision",
            "copyright",
            "notes",
            "watermark",
            "font",
            "font italic",
            "font bold",
            "font bold italic",
            "metadata",
            "header",
            "footer",
            "tl",
            "tc",
            "tr",
            "cc",
            "bl",
            "br",
        ]
    }

    /// 无需以 TO: 结尾也被视为规范的转场
    pub fn standard_transitions() -> &'static [&'static str] {
        &[
            "FADE IN:",
            "FADE OUT.",
            "FADE TO BLACK.",
            "FADE OUT:",
            "CUT TO BLACK.",
            "THE END",
            "THE END.",
        ]
    }
}

lazy_static! {
    // 块起始行正则（均作用于去除首尾空白后的行）
    pub static ref BLOCK_REGEX: BlockRegex = BlockRegex {
        title_key_known: Regex::new(r"(?i)^(title|credit|author[s]?|source|notes|draft date|date|watermark|contact( info)?|revision|copyright|font|font italic|font bold|font bold italic|metadata|tl|tc|tr|cc|br|bl|header|footer)\s*:").unwrap(),
        title_key_line: Regex::new(r"^([A-Za-z][A-Za-z0-9 _\-]*?)\s*:(.*)$").unwrap(),
        scene_heading: Regex::new(r"(?i)^(?:int\.?/ext|ext\.?/int|i/e|int|ext|est)(?:\.|\s)").unwrap(),
        scene_number: Regex::new(r"^(.*?)\s*#([^#]*)#\s*$").unwrap(),
        transition: Regex::new(r"^[A-Z ]+TO:$").unwrap(),
        page_break: Regex::new(r"^={3,}$").unwrap(),
        character_name: Regex::new(r"^\p{Lu}[^\p{Ll}]*$").unwrap(),
        parenthetical: Regex::new(r"^\(.*\)$").unwrap(),
    };

    // 场景标题拆分正则
    pub static ref HEADING_REGEX: HeadingRegex = HeadingRegex {
        prefix: Regex::new(r"(?i)^(int\.?/ext|ext\.?/int|i/e|int|ext|est)(?:\.\s*|\s+|$)").unwrap(),
        time_split: Regex::new(r"^(.*)\s+[-–—]+\s*(.*)$").unwrap(),
    };

    // 时长估算正则
    pub static ref DURATION_REGEX: DurationRegex = DurationRegex {
        countable: Regex::new(r"\s|\p{P}|\p{S}").unwrap(),
        punctuation: Regex::new(r"(\.|\?|\!|\:|。|？|！|：)|(\,|，|;|；|、)").unwrap(),
    };
}

pub struct BlockRegex {
    pub title_key_known: Regex,
    pub title_key_line: Regex,
    pub scene_heading: Regex,
    pub scene_number: Regex,
    pub transition: Regex,
    pub page_break: Regex,
    pub character_name: Regex,
    pub parenthetical: Regex,
}

pub struct HeadingRegex {
    pub prefix: Regex,
    pub time_split: Regex,
}

pub struct DurationRegex {
    pub countable: Regex,
    pub punctuation: Regex,
}
