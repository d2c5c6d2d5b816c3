//! 题库文本解析
//!
//! 解析核心是纯同步、单趟的转换：
//! 切分（splitter）→ 逐块解析（block）→ 重编号（numbering）。

pub mod block;
pub mod numbering;
pub mod splitter;

pub use block::{detect_block_type, parse_question_block};
pub use numbering::{
    number_blocks_by_type, number_blocks_global, QuestionBuckets, TypeCounters,
};
pub use splitter::{split_blocks, BlockBoundary};
