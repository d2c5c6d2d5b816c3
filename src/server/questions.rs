//! 在线模式的题库加载
//!
//! 每次请求重新读取并解析题库文件：宽松题号边界、
//! 丢弃"此题未答"残留块、全局统一编号。

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::warn;

use crate::models::ParsedQuestion;
use crate::parser::{number_blocks_global, split_blocks, BlockBoundary};

/// 从题库文件加载全部题目
///
/// 文件不存在时返回空列表（页面可以正常渲染一个空题库）。
pub async fn load_questions(path: &str) -> Result<Vec<ParsedQuestion>> {
    if !Path::new(path).exists() {
        warn!("⚠️ 题库文件不存在: {}", path);
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取题库文件: {}", path))?;

    let blocks = split_blocks(&content, BlockBoundary::Flexible);
    Ok(number_blocks_global(&blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_yields_empty_bank() {
        let questions = load_questions("不存在的文件.txt").await.unwrap();
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn test_load_applies_global_numbering_and_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "1.单选题：甲\nA.\n一\n正确答案: A\n2.残留\n此题未答\n3、判断题：乙\n正确答案: B\n"
        )
        .unwrap();

        let questions = load_questions(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].anchor_id, "q1");
        assert_eq!(questions[1].anchor_id, "q2");
    }
}
