//! 题块解析
//!
//! 把一个题块（题干、选项字母行、答案行的松散组合）解析为
//! 结构化的 [`ParsedQuestion`]。
//!
//! 扫描分三个阶段：
//! 1. 题干阶段：逐行累积描述，顺带探测题型标记；
//! 2. 选项阶段：字母标记行与其后的内容行交替推进；
//! 3. 收尾：答案行提取、重编号、锚点生成。

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{ParsedQuestion, QuestionOption, QuestionType};

/// 答案行前缀
const ANSWER_MARKER: &str = "正确答案";
/// 答案解释行前缀（扫描但不计入题干）
const EXPLANATION_MARKER: &str = "答案解释";

/// 行首题号（句点 / 顿号 / 空白 分隔）
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[.、\s]").expect("题号正则无效"));

/// 独占一行的选项字母标记（A / A. / ... / D.）
static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-D]\.?$").expect("选项标记正则无效"));

/// 只探测题块的题型，不构建完整题目
///
/// 与完整解析使用同一套题干扫描规则，供两趟编号协议的
/// 第一趟使用：先探测题型决定用哪个计数器，再提交解析。
pub fn detect_block_type(block: &str) -> Option<QuestionType> {
    let lines = normalize_lines(block);
    scan_description(&lines).detected
}

/// 解析单个题块
///
/// # 参数
/// - `block`: 题块原文
/// - `new_number`: 重编后的题号（None 表示保留原始编号）
/// - `forced_type`: 调用方指定的题型，优先于探测结果
///
/// # 返回
/// 去除空白后为空的题块返回 None；其余题块总能解析出结构化题目。
/// 题型探测失败且未指定时按单选题处理。
pub fn parse_question_block(
    block: &str,
    new_number: Option<usize>,
    forced_type: Option<QuestionType>,
) -> Option<ParsedQuestion> {
    if block.trim().is_empty() {
        return None;
    }

    let lines = normalize_lines(block);

    // 原始编号只作锚点兜底，不参与重编
    let original_number = lines
        .first()
        .and_then(|l| LEADING_NUMBER.captures(l))
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let scan = scan_description(&lines);
    let q_type = forced_type
        .or(scan.detected)
        .unwrap_or(QuestionType::Single);

    // 答案行可能出现在题块任意位置，取第一条
    let answer_line = lines
        .iter()
        .find(|l| l.starts_with(ANSWER_MARKER))
        .map(|l| l.to_string());
    let correct_letters = parse_correct_letters(answer_line.as_deref());

    let (options, option_correct) = match q_type {
        QuestionType::Judge => judge_options(&correct_letters),
        _ => collect_options(&lines, scan.next_index, &correct_letters),
    };

    let mut description = scan.description;
    if let Some(n) = new_number {
        if let Some(first) = description.first_mut() {
            *first = LEADING_NUMBER.replace(first, format!("{n}.")).into_owned();
        }
    }

    let anchor_id = match new_number {
        Some(n) => format!("q{n}"),
        None => format!("q{original_number}"),
    };

    Some(ParsedQuestion {
        description,
        q_type,
        options,
        option_correct,
        correct_letters,
        answer_line,
        anchor_id,
        original_number,
    })
}

/// 行规整：去掉行尾空白，丢弃空行，保持顺序
fn normalize_lines(block: &str) -> Vec<&str> {
    block
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect()
}

struct DescriptionScan {
    description: Vec<String>,
    detected: Option<QuestionType>,
    /// 题干扫描停下的位置（第一个选项标记行或答案行）
    next_index: usize,
}

/// 题干阶段：扫到选项标记行或答案行为止
///
/// 解释行参与推进但既不计入题干也不参与题型探测；
/// 题型标记以最后一次命中为准。
fn scan_description(lines: &[&str]) -> DescriptionScan {
    let mut description = Vec::new();
    let mut detected = None;
    let mut i = 0;

    while i < lines.len() && !OPTION_MARKER.is_match(lines[i]) && !lines[i].starts_with(ANSWER_MARKER)
    {
        let line = lines[i];
        if !line.starts_with(EXPLANATION_MARKER) {
            if let Some(t) = QuestionType::detect(line) {
                detected = Some(t);
            }
            description.push(line.to_string());
        }
        i += 1;
    }

    DescriptionScan {
        description,
        detected,
        next_index: i,
    }
}

/// 从答案行解析正确选项字母
///
/// 冒号后的部分按空白切分、逐个转大写；
/// 没有冒号的畸形答案行容忍为空集合。
fn parse_correct_letters(answer_line: Option<&str>) -> Vec<String> {
    answer_line
        .and_then(|l| l.split_once(':'))
        .map(|(_, tail)| {
            tail.split_whitespace()
                .map(|t| t.to_uppercase())
                .collect()
        })
        .unwrap_or_default()
}

/// 判断题固定两个选项，正确性只看答案行的第一个字母
fn judge_options(correct_letters: &[String]) -> (Vec<QuestionOption>, Vec<bool>) {
    let options = vec![
        QuestionOption {
            letter: 'A',
            text: "正确".to_string(),
        },
        QuestionOption {
            letter: 'B',
            text: "错误".to_string(),
        },
    ];
    let option_correct = match correct_letters.first() {
        Some(first) => vec![first == "A", first == "B"],
        None => vec![false, false],
    };
    (options, option_correct)
}

/// 选项阶段：字母标记行之后的内容行无分隔符拼接
///
/// 源文本按固定宽度折行，选项内容常被拆成多行，
/// 拼接时不插入任何分隔符；孤立的 "." 行是折行残留，跳过。
/// 拼接后为空的选项整个丢弃，因此字母可能不连续。
fn collect_options(
    lines: &[&str],
    mut i: usize,
    correct_letters: &[String],
) -> (Vec<QuestionOption>, Vec<bool>) {
    let mut options = Vec::new();
    let mut option_correct = Vec::new();

    while i < lines.len() && OPTION_MARKER.is_match(lines[i]) {
        let letter = lines[i].chars().next().unwrap_or('A');
        i += 1;
        // 折行残留：字母标记行后孤立的 "."
        if i < lines.len() && lines[i] == "." {
            i += 1;
        }

        let mut body: Vec<&str> = Vec::new();
        while i < lines.len()
            && !OPTION_MARKER.is_match(lines[i])
            && !lines[i].starts_with(ANSWER_MARKER)
        {
            if lines[i] != "." {
                body.push(lines[i].trim());
            }
            i += 1;
        }

        let text = body.concat();
        let text = text.trim();
        if !text.is_empty() {
            option_correct.push(correct_letters.iter().any(|c| c == &letter.to_string()));
            options.push(QuestionOption {
                letter,
                text: text.to_string(),
            });
        }
    }

    (options, option_correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SINGLE_BLOCK: &str = "3.单选题：测试题\nA.\n选项甲\nB.\n选项乙\n正确答案: A";

    #[test]
    fn test_single_choice_block() {
        let q = parse_question_block(SINGLE_BLOCK, None, None).unwrap();
        assert_eq!(q.q_type, QuestionType::Single);
        assert_eq!(
            q.options.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
            vec!["A. 选项甲", "B. 选项乙"]
        );
        assert_eq!(q.option_correct, vec![true, false]);
        assert_eq!(q.correct_letters, vec!["A"]);
        assert_eq!(q.original_number, "3");
        assert_eq!(q.anchor_id, "q3");
    }

    #[test]
    fn test_renumbering_rewrites_first_line_and_anchor() {
        let q = parse_question_block(SINGLE_BLOCK, Some(1), None).unwrap();
        assert_eq!(q.description[0], "1.单选题：测试题");
        assert_eq!(q.anchor_id, "q1");
        // 原始编号仍然保留
        assert_eq!(q.original_number, "3");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let a = parse_question_block(SINGLE_BLOCK, Some(7), Some(QuestionType::Single)).unwrap();
        let b = parse_question_block(SINGLE_BLOCK, Some(7), Some(QuestionType::Single)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_judge_block_fixed_options() {
        let block = "5.判断题：地球是圆的\n正确答案: B";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.q_type, QuestionType::Judge);
        assert_eq!(
            q.options.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
            vec!["A. 正确", "B. 错误"]
        );
        assert_eq!(q.option_correct, vec![false, true]);
    }

    #[test]
    fn test_judge_without_answer_line_keeps_parallel_lengths() {
        let block = "5.判断题：没有答案行";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.option_correct, vec![false, false]);
        assert!(q.answer_line.is_none());
        assert!(q.correct_letters.is_empty());
    }

    #[test]
    fn test_judge_ignores_stray_option_markers() {
        // 判断题即使带了选项字母行也固定渲染两个选项
        let block = "5.判断题：带残留选项\nA.\n对\nB.\n错\n正确答案: A";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.options[0].text, "正确");
        assert_eq!(q.option_correct, vec![true, false]);
    }

    #[test]
    fn test_option_body_joined_without_separator() {
        let block = "1.多选题：折行选项\nA.\n前半段\n后半段\nB\n完整行\n正确答案: A B";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.options[0].text, "前半段后半段");
        assert_eq!(q.options[1].text, "完整行");
        assert_eq!(q.option_correct, vec![true, true]);
    }

    #[test]
    fn test_blank_option_dropped_letters_non_contiguous() {
        let block = "2.单选题：空选项\nA.\nB.\n乙内容\nC.\n丙内容\n正确答案: C";
        let q = parse_question_block(block, None, None).unwrap();
        let letters: Vec<char> = q.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['B', 'C']);
        assert_eq!(q.option_correct, vec![false, true]);
    }

    #[test]
    fn test_dot_continuation_lines_skipped() {
        let block = "4.单选题：折行残留\nA.\n.\n甲\n.\nB.\n乙\n正确答案: B";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.options[0].text, "甲");
        assert_eq!(q.options[1].text, "乙");
    }

    #[test]
    fn test_explanation_line_excluded_from_description() {
        let block = "6.单选题：带解释\n答案解释：这一行不进题干\n补充题干\nA.\n甲\n正确答案: A";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.description, vec!["6.单选题：带解释", "补充题干"]);
    }

    #[test]
    fn test_last_type_marker_wins() {
        let block = "7.本卷原为单选题\n以下改为多选题作答\nA.\n甲\n正确答案: A";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.q_type, QuestionType::Multi);
    }

    #[test]
    fn test_forced_type_overrides_detection() {
        let q = parse_question_block(SINGLE_BLOCK, None, Some(QuestionType::Multi)).unwrap();
        assert_eq!(q.q_type, QuestionType::Multi);
    }

    #[test]
    fn test_no_answer_line_tolerated() {
        let block = "8.单选题：无答案\nA.\n甲\nB.\n乙";
        let q = parse_question_block(block, None, None).unwrap();
        assert!(q.answer_line.is_none());
        assert!(q.correct_letters.is_empty());
        assert_eq!(q.option_correct, vec![false, false]);
    }

    #[test]
    fn test_malformed_answer_line_without_colon() {
        let block = "9.单选题：畸形答案行\nA.\n甲\n正确答案 A";
        let q = parse_question_block(block, None, None).unwrap();
        assert!(q.answer_line.is_some());
        assert!(q.correct_letters.is_empty());
        assert_eq!(q.option_correct, vec![false]);
    }

    #[test]
    fn test_answer_letters_uppercased() {
        let block = "10.多选题：小写答案\nA.\n甲\nB.\n乙\n正确答案: a b";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.correct_letters, vec!["A", "B"]);
        assert_eq!(q.option_correct, vec![true, true]);
    }

    #[test]
    fn test_block_without_options_still_parses() {
        let block = "11.单选题：只有题干\n正确答案: A";
        let q = parse_question_block(block, None, None).unwrap();
        assert!(q.options.is_empty());
        assert!(q.option_correct.is_empty());
        assert_eq!(q.correct_letters, vec!["A"]);
    }

    #[test]
    fn test_empty_block_returns_none() {
        assert!(parse_question_block("   \n  \n", None, None).is_none());
    }

    #[test]
    fn test_no_number_yields_degenerate_anchor() {
        let block = "没有编号的题干\nA.\n甲\n正确答案: A";
        let q = parse_question_block(block, None, None).unwrap();
        assert_eq!(q.original_number, "");
        assert_eq!(q.anchor_id, "q");
    }

    #[test]
    fn test_detect_block_type() {
        assert_eq!(
            detect_block_type("1.多选题：xx\nA.\n甲\n正确答案: A"),
            Some(QuestionType::Multi)
        );
        assert_eq!(detect_block_type("1.没有标记的题\n正确答案: A"), None);
        // 答案行之后的标记不参与探测
        assert_eq!(detect_block_type("1.题干\n正确答案: A\n判断题"), None);
    }

    #[test]
    fn test_flexible_number_separators() {
        for block in ["12、顿号题\n正确答案: A", "12 空格题\n正确答案: A"] {
            let q = parse_question_block(block, Some(3), None).unwrap();
            assert_eq!(q.original_number, "12");
            assert!(q.description[0].starts_with("3."));
        }
    }
}
