//! # Question Bank Render
//!
//! 把松散的中文题库文本（单选 / 多选 / 判断）转换成可交互的
//! 自测页面，并提供一个带登录与收藏功能的在线学习服务。
//!
//! ## 架构设计
//!
//! ### ① 解析核心（parser）
//! - `parser/splitter` - 按行首题号边界切分题块
//! - `parser/block` - 单个题块到结构化题目的解析状态机
//! - `parser/numbering` - 两种编号策略（按题型分桶 / 全局单计数器）
//!
//! ### ② 判分（grading）
//! - 服务端权威判分函数，与页面内嵌脚本保持同一套规则
//!
//! ### ③ 渲染（render）
//! - `render/question` - 单题页面片段
//! - `render/page` - 转换页与在线页两种整页外壳
//!
//! ### ④ 入口（app / server）
//! - `app` - 批量转换：目录扫描 → 解析 → 整页写出
//! - `server` - 在线服务：登录、收藏、判分接口
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod grading;
pub mod logger;
pub mod models;
pub mod parser;
pub mod render;
pub mod server;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use grading::grade;
pub use models::{ParsedQuestion, QuestionOption, QuestionType};
pub use parser::{
    detect_block_type, number_blocks_by_type, number_blocks_global, parse_question_block,
    split_blocks, BlockBoundary, QuestionBuckets, TypeCounters,
};
pub use render::{render_app_page, render_page, render_question};
