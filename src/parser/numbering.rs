//! 重编号与锚点分配
//!
//! 两种编号策略，各自绑定一个入口，互不混用：
//! - 按题型独立计数（批量转换模式）：三个计数器都从 1 开始，
//!   锚点只在题型分区内唯一，页面必须按分区渲染；
//! - 全局单计数器（在线模式）：对保留下来的题块统一递增，
//!   锚点在整个文档内全局唯一。
//!
//! 编号都走两趟协议：先不带编号探测题型，确定计数器后再提交解析。

use tracing::warn;

use crate::models::{ParsedQuestion, QuestionType};
use crate::parser::block::{detect_block_type, parse_question_block};

/// 按题型独立的编号计数器
///
/// 显式传入编号趟次、随折叠推进，不依赖任何全局可变状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounters {
    single: usize,
    multi: usize,
    judge: usize,
}

impl TypeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 领取指定题型的下一个编号（从 1 开始）
    pub fn claim(&mut self, q_type: QuestionType) -> usize {
        let counter = match q_type {
            QuestionType::Single => &mut self.single,
            QuestionType::Multi => &mut self.multi,
            QuestionType::Judge => &mut self.judge,
        };
        *counter += 1;
        *counter
    }

    /// 某一题型已分配的数量
    pub fn count(&self, q_type: QuestionType) -> usize {
        match q_type {
            QuestionType::Single => self.single,
            QuestionType::Multi => self.multi,
            QuestionType::Judge => self.judge,
        }
    }
}

/// 按题型分桶的编号结果
#[derive(Debug, Clone, Default)]
pub struct QuestionBuckets {
    pub single: Vec<ParsedQuestion>,
    pub multi: Vec<ParsedQuestion>,
    pub judge: Vec<ParsedQuestion>,
}

impl QuestionBuckets {
    pub fn push(&mut self, question: ParsedQuestion) {
        match question.q_type {
            QuestionType::Single => self.single.push(question),
            QuestionType::Multi => self.multi.push(question),
            QuestionType::Judge => self.judge.push(question),
        }
    }

    pub fn extend(&mut self, other: QuestionBuckets) {
        self.single.extend(other.single);
        self.multi.extend(other.multi);
        self.judge.extend(other.judge);
    }

    pub fn total(&self) -> usize {
        self.single.len() + self.multi.len() + self.judge.len()
    }
}

/// 批量转换模式：按题型分桶编号
///
/// # 参数
/// - `blocks`: 切分后的题块
/// - `counters`: 跨文件共享的计数器状态
///
/// # 返回
/// 分桶后的题目；每个桶内编号按源顺序单调递增。
/// 探测不出题型的题块按单选题处理（记一条警告，不中断批次）。
pub fn number_blocks_by_type(blocks: &[String], counters: &mut TypeCounters) -> QuestionBuckets {
    let mut buckets = QuestionBuckets::default();

    for block in blocks {
        if block.trim().is_empty() {
            continue;
        }
        let q_type = detect_block_type(block).unwrap_or_else(|| {
            warn!("⚠️ 未识别题型，按单选题处理: {}", block_preview(block));
            QuestionType::Single
        });
        let number = counters.claim(q_type);
        if let Some(question) = parse_question_block(block, Some(number), Some(q_type)) {
            buckets.push(question);
        }
    }

    buckets
}

/// 在线模式：全局单计数器编号
///
/// 对每个保留下来的题块统一递增编号，保证锚点全局唯一。
pub fn number_blocks_global(blocks: &[String]) -> Vec<ParsedQuestion> {
    let mut questions = Vec::new();
    let mut counter = 0usize;

    for block in blocks {
        if block.trim().is_empty() {
            continue;
        }
        let q_type = detect_block_type(block).unwrap_or(QuestionType::Single);
        if let Some(question) = parse_question_block(block, Some(counter + 1), Some(q_type)) {
            questions.push(question);
            counter += 1;
        }
    }

    questions
}

fn block_preview(block: &str) -> String {
    let first = block.trim().lines().next().unwrap_or("");
    if first.chars().count() > 40 {
        first.chars().take(40).collect::<String>() + "..."
    } else {
        first.to_string()
    }
}
