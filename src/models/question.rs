use serde::Serialize;

use crate::models::question_type::QuestionType;

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    /// 选项字母（A-D）
    pub letter: char,
    /// 选项内容
    pub text: String,
}

impl std::fmt::Display for QuestionOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.letter, self.text)
    }
}

/// 解析后的题目
///
/// 每次渲染都会重新构建，不做持久化；锚点 ID 是题目与
/// 收藏记录、页面脚本状态之间唯一的关联键。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuestion {
    /// 题干描述行（首行带重编后的题号前缀）
    pub description: Vec<String>,
    /// 题型
    pub q_type: QuestionType,
    /// 选项列表（判断题固定为 正确/错误 两项）
    pub options: Vec<QuestionOption>,
    /// 与 options 对齐的正确性标记
    pub option_correct: Vec<bool>,
    /// 答案行声明的正确选项字母（已转大写，可能为空）
    pub correct_letters: Vec<String>,
    /// 原始答案行（源文本没有答案行时为 None）
    pub answer_line: Option<String>,
    /// 锚点 ID（"q" + 题号）
    pub anchor_id: String,
    /// 源文本中的原始编号（仅作锚点兜底）
    pub original_number: String,
}
