//! 题块切分
//!
//! 按行首题号边界把整份题库文本切成候选题块。
//! 题号只有出现在行首才构成边界，题干中间出现的数字不会切断题块。

use regex::Regex;
use std::sync::LazyLock;

/// 行首题号后允许的分隔符规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockBoundary {
    /// 仅句点（批量转换模式：`12.`）
    Period,
    /// 句点、顿号或空白（在线模式：`12.` / `12、` / `12 `）
    Flexible,
}

static PERIOD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("题号边界正则无效"));

static FLEXIBLE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.、\s]|$)").expect("题号边界正则无效"));

/// 未作答题目的导出残留标记，在线模式下整块丢弃
const UNANSWERED_MARKER: &str = "此题未答";

impl BlockBoundary {
    /// 判断一行是否开启新的题块
    fn is_boundary(self, line: &str) -> bool {
        match self {
            BlockBoundary::Period => PERIOD_BOUNDARY.is_match(line),
            BlockBoundary::Flexible => FLEXIBLE_BOUNDARY.is_match(line),
        }
    }
}

/// 把题库全文切分为题块序列
///
/// # 参数
/// - `content`: 题库文件全文
/// - `boundary`: 题号边界规则
///
/// # 返回
/// 按出现顺序排列的题块；纯空白题块被丢弃，
/// `Flexible` 规则下还会丢弃含"此题未答"标记的题块。
pub fn split_blocks(content: &str, boundary: BlockBoundary) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if boundary.is_boundary(line) && !current.is_empty() {
            push_block(&mut blocks, &current, boundary);
            current.clear();
        }
        current.push(line);
    }
    if !current.is_empty() {
        push_block(&mut blocks, &current, boundary);
    }

    blocks
}

fn push_block(blocks: &mut Vec<String>, lines: &[&str], boundary: BlockBoundary) {
    let block = lines.join("\n");
    if block.trim().is_empty() {
        return;
    }
    if boundary == BlockBoundary::Flexible && block.contains(UNANSWERED_MARKER) {
        return;
    }
    blocks.push(block);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_period_boundary() {
        let content = "1.第一题\nA.\n甲\n正确答案: A\n2.第二题\nB.\n乙\n正确答案: B\n";
        let blocks = split_blocks(content, BlockBoundary::Period);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("第一题"));
        assert!(blocks[1].starts_with("2.第二题"));
    }

    #[test]
    fn test_mid_line_number_does_not_split() {
        let content = "1.第一题，引用了 2.5 这样的数字\n还有一行提到\n3.14159\n正确答案: A";
        // "3.14159" 行首是数字加句点，确实构成边界；
        // 但题干内部（非行首）的 "2.5" 不会切断题块
        let blocks = split_blocks(content, BlockBoundary::Period);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("2.5"));
    }

    #[test]
    fn test_flexible_accepts_more_separators() {
        let content = "1、顿号题\n正确答案: A\n2 空格题\n正确答案: B\n";
        assert_eq!(split_blocks(content, BlockBoundary::Period).len(), 1);
        assert_eq!(split_blocks(content, BlockBoundary::Flexible).len(), 2);
    }

    #[test]
    fn test_whitespace_only_blocks_discarded() {
        let content = "\n   \n1.实际题目\n正确答案: A\n";
        let blocks = split_blocks(content, BlockBoundary::Period);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("实际题目"));
    }

    #[test]
    fn test_unanswered_blocks_dropped_in_flexible_only() {
        let content = "1.正常题目\n正确答案: A\n2.残留题目\n此题未答\n3.另一道题\n正确答案: C\n";
        let flexible = split_blocks(content, BlockBoundary::Flexible);
        assert_eq!(flexible.len(), 2);
        assert!(flexible.iter().all(|b| !b.contains("此题未答")));

        let period = split_blocks(content, BlockBoundary::Period);
        assert_eq!(period.len(), 3);
    }

    #[test]
    fn test_first_block_without_leading_newline() {
        let content = "1.开头就是题目\n正确答案: A";
        let blocks = split_blocks(content, BlockBoundary::Period);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let content = "3.丙\n正确答案: A\n1.甲\n正确答案: B\n2.乙\n正确答案: C\n";
        let blocks = split_blocks(content, BlockBoundary::Period);
        assert!(blocks[0].contains('丙'));
        assert!(blocks[1].contains('甲'));
        assert!(blocks[2].contains('乙'));
    }
}
