//! 判分
//!
//! 同一套规则在三处生效：本模块（服务端权威判分）、
//! 转换产物页面内嵌脚本、在线页面的答案确认请求，三者不得分叉。

use std::collections::BTreeSet;

use crate::models::QuestionType;

/// 判定一次作答是否正确
///
/// # 参数
/// - `q_type`: 题型
/// - `correct_letters`: 答案行声明的正确字母集合
/// - `user_letters`: 用户提交的字母序列
///
/// # 返回
/// 严格布尔判定，没有部分得分：
/// - 多选题：提交数量与正确数量一致且字母集合完全相等；
/// - 单选题 / 判断题：恰好提交一个字母且等于第一个正确字母。
///
/// 比较不区分大小写。正确集合为空时恒判错，不会恐慌。
pub fn grade(q_type: QuestionType, correct_letters: &[String], user_letters: &[String]) -> bool {
    if correct_letters.is_empty() {
        return false;
    }

    let correct: Vec<String> = correct_letters.iter().map(|l| l.to_uppercase()).collect();
    let user: Vec<String> = user_letters.iter().map(|l| l.to_uppercase()).collect();

    match q_type {
        QuestionType::Multi => {
            let correct_set: BTreeSet<&str> = correct.iter().map(String::as_str).collect();
            let user_set: BTreeSet<&str> = user.iter().map(String::as_str).collect();
            user.len() == correct.len() && user_set == correct_set
        }
        QuestionType::Single | QuestionType::Judge => {
            user.len() == 1 && user[0] == correct[0]
        }
    }
}
