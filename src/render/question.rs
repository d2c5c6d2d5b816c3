//! 单题片段渲染
//!
//! 每道题输出一段自包含的标记：以锚点 ID 为容器键，
//! 选项上用 data-correct 属性携带正确性标记。该标记默认视觉上
//! 不可见，只在用户主动判分 / 显示答案时由页面脚本读取——
//! 答案对查看页面源码的用户可见，这是既定的取舍，不在此处修补。

use crate::models::ParsedQuestion;

/// 渲染一道题的页面片段
pub fn render_question(question: &ParsedQuestion) -> String {
    let anchor = &question.anchor_id;
    let mut html: Vec<String> = Vec::new();

    html.push(format!(
        r#"<div class="question-block {}" id="{}">"#,
        question.q_type.css_class(),
        anchor
    ));
    html.push(r#"  <div class="question-header">"#.to_string());
    html.push(format!(
        r#"    <span class="question-type">{}</span>"#,
        question.q_type.label()
    ));
    html.push(format!(
        r#"    <div class="question-marker" onclick="toggleBookmark('{anchor}')">📌</div>"#
    ));
    for desc in &question.description {
        html.push(format!(
            r#"    <div class="question-desc">{}</div>"#,
            html_escape::encode_text(desc)
        ));
    }
    html.push("  </div>".to_string());

    if !question.options.is_empty() {
        html.push(r#"  <div class="options">"#.to_string());
        for (option, correct) in question.options.iter().zip(&question.option_correct) {
            html.push(format!(
                r#"    <div class="option" data-correct="{}" data-letter="{}" onclick="selectOption(this)">{}. {}</div>"#,
                correct,
                option.letter,
                option.letter,
                html_escape::encode_text(&option.text)
            ));
        }
        html.push("  </div>".to_string());

        html.push(r#"  <div class="question-footer">"#.to_string());
        html.push(format!(
            r#"    <button class="check-btn" onclick="checkAnswer('{anchor}')">确认答案</button>"#
        ));
        html.push(format!(
            r#"    <button class="reset-btn" onclick="resetQuestion('{anchor}')">重置</button>"#
        ));
        html.push("  </div>".to_string());
    }

    html.push(r#"  <div class="answer-feedback" style="display:none;"></div>"#.to_string());

    if let Some(answer_line) = &question.answer_line {
        html.push(format!(
            r#"  <div class="correct-answer" style="display:none;">{}</div>"#,
            html_escape::encode_text(answer_line)
        ));
    }

    html.push("</div>".to_string());
    html.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_question_block;

    #[test]
    fn test_fragment_keyed_by_anchor() {
        let q = parse_question_block("3.单选题：测试\nA.\n甲\n正确答案: A", Some(1), None).unwrap();
        let html = render_question(&q);
        assert!(html.contains(r#"id="q1""#));
        assert!(html.contains("single-choice"));
        assert!(html.contains(r#"data-correct="true" data-letter="A""#));
        assert!(html.contains("确认答案"));
    }

    #[test]
    fn test_correctness_flag_present_but_not_revealed() {
        let q = parse_question_block("3.单选题：测试\nA.\n甲\nB.\n乙\n正确答案: B", None, None)
            .unwrap();
        let html = render_question(&q);
        assert!(html.contains(r#"data-correct="false" data-letter="A""#));
        assert!(html.contains(r#"data-correct="true" data-letter="B""#));
        // 答案区存在但默认隐藏
        assert!(html.contains(r#"<div class="correct-answer" style="display:none;">"#));
    }

    #[test]
    fn test_no_answer_line_omits_answer_region() {
        let q = parse_question_block("3.单选题：无答案\nA.\n甲", None, None).unwrap();
        let html = render_question(&q);
        assert!(!html.contains("correct-answer"));
        assert!(html.contains("answer-feedback"));
    }

    #[test]
    fn test_no_options_block_renders_without_options_section() {
        let q = parse_question_block("3.单选题：只有题干\n正确答案: A", None, None).unwrap();
        let html = render_question(&q);
        assert!(!html.contains(r#"<div class="options">"#));
        assert!(!html.contains("check-btn"));
        assert!(html.contains("correct-answer"));
    }

    #[test]
    fn test_judge_renders_two_options() {
        let q = parse_question_block("4.判断题：测试\n正确答案: B", None, None).unwrap();
        let html = render_question(&q);
        assert!(html.contains("judge-question"));
        assert!(html.contains(r#"data-correct="false" data-letter="A""#));
        assert!(html.contains(r#"data-correct="true" data-letter="B""#));
        assert!(html.contains(">A. 正确</div>"));
        assert!(html.contains(">B. 错误</div>"));
    }

    #[test]
    fn test_text_content_escaped() {
        let q = parse_question_block(
            "5.单选题：比较 <a> 与 &amp\nA.\n1 < 2\n正确答案: A",
            None,
            None,
        )
        .unwrap();
        let html = render_question(&q);
        assert!(html.contains("&lt;a&gt;"));
        assert!(html.contains("1 &lt; 2"));
    }
}
