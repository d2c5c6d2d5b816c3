/// 题型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    Single,
    /// 多选题
    Multi,
    /// 判断题
    Judge,
}

impl QuestionType {
    /// 获取类型键名（用于 API 返回值）
    pub fn key(self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multi => "multi",
            QuestionType::Judge => "judge",
        }
    }

    /// 获取标准名称
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Single => "单选题",
            QuestionType::Multi => "多选题",
            QuestionType::Judge => "判断题",
        }
    }

    /// 获取页面样式类名
    pub fn css_class(self) -> &'static str {
        match self {
            QuestionType::Single => "single-choice",
            QuestionType::Multi => "multi-choice",
            QuestionType::Judge => "judge-question",
        }
    }

    /// 从键名解析题型
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "single" => Some(QuestionType::Single),
            "multi" => Some(QuestionType::Multi),
            "judge" => Some(QuestionType::Judge),
            _ => None,
        }
    }

    /// 从一行题干文本中探测题型标记
    ///
    /// 按 单选题 → 多选题 → 判断题 的顺序做子串匹配，
    /// 一行同时出现多个标记时取最先命中的一个。
    pub fn detect(line: &str) -> Option<Self> {
        if line.contains("单选题") {
            return Some(QuestionType::Single);
        }
        if line.contains("多选题") {
            return Some(QuestionType::Multi);
        }
        if line.contains("判断题") {
            return Some(QuestionType::Judge);
        }
        None
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
