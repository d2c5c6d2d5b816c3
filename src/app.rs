//! 批量转换应用
//!
//! 扫描题库目录 → 并发读取文件 → 按源顺序编号折叠 →
//! 渲染整页 → 一次性写出。编号折叠必须按排序后的文件顺序
//! 串行推进，保证多次运行产出稳定一致的编号。

use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::parser::{
    number_blocks_by_type, split_blocks, BlockBoundary, QuestionBuckets, TypeCounters,
};
use crate::render::render_page;

/// 应用主结构
pub struct App {
    config: Config,
}

/// 文件处理统计
#[derive(Debug, Default)]
struct ConvertStats {
    processed_files: usize,
    skipped_files: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        if !Path::new(&config.input_folder).is_dir() {
            return Err(AppError::DirectoryNotFound {
                path: config.input_folder.clone(),
            }
            .into());
        }

        log_startup(&config);
        Ok(Self { config })
    }

    /// 运行转换主流程
    pub async fn run(&self) -> Result<()> {
        let files = scan_txt_files(&self.config.input_folder).await?;
        if files.is_empty() {
            return Err(AppError::NoInput {
                path: self.config.input_folder.clone(),
            }
            .into());
        }
        info!("✓ 找到 {} 个题库文件", files.len());

        // 并发读取；单个文件失败只记警告，不影响其余文件
        let contents = join_all(files.iter().map(|path| read_bank_file(path))).await;

        // 编号折叠严格按文件排序顺序串行推进
        let mut counters = TypeCounters::new();
        let mut buckets = QuestionBuckets::default();
        let mut stats = ConvertStats::default();

        for (path, content) in files.iter().zip(contents) {
            let Some(content) = content else {
                stats.skipped_files += 1;
                continue;
            };
            let blocks = split_blocks(&content, BlockBoundary::Period);
            info!(
                "处理文件: {} (共 {} 题)",
                file_name(path),
                blocks.len()
            );
            buckets.extend(number_blocks_by_type(&blocks, &mut counters));
            stats.processed_files += 1;
        }

        if buckets.total() == 0 {
            warn!("⚠️ 所有文件中没有解析出任何题目");
        }

        // 所有题块解析完成后才生成并写出，避免半成品输出
        let html = render_page(&buckets, &self.config.page_title);
        write_output(&self.config.output_html, &html).await?;

        print_final_stats(&stats, &buckets, &self.config.output_html);
        Ok(())
    }
}

/// 扫描目录下的 txt 题库文件（按文件名排序）
async fn scan_txt_files(folder: &str) -> Result<Vec<PathBuf>> {
    let mut txt_files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt") {
            txt_files.push(path);
        }
    }

    txt_files.sort();
    Ok(txt_files)
}

/// 读取单个题库文件，失败时记警告并返回 None
async fn read_bank_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(source) => {
            let err = AppError::ReadFailed {
                path: path.to_path_buf(),
                source,
            };
            warn!("⚠️ {}", err);
            None
        }
    }
}

/// 一次性写出页面文件
async fn write_output(output_path: &str, html: &str) -> Result<()> {
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("无法创建输出目录: {}", parent.display()))?;
        }
    }
    fs::write(path, html)
        .await
        .map_err(|source| AppError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().to_string()
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库转换模式");
    info!("📁 题库目录: {}", config.input_folder);
    info!("📄 输出文件: {}", config.output_html);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &ConvertStats, buckets: &QuestionBuckets, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 成功处理 {} 个文件, 跳过 {} 个",
        stats.processed_files, stats.skipped_files
    );
    info!(
        "一、单选题: {} 道 (编号: 1-{})",
        buckets.single.len(),
        buckets.single.len()
    );
    info!(
        "二、多选题: {} 道 (编号: 1-{})",
        buckets.multi.len(),
        buckets.multi.len()
    );
    info!(
        "三、判断题: {} 道 (编号: 1-{})",
        buckets.judge.len(),
        buckets.judge.len()
    );
    info!("{}", "=".repeat(60));
    info!("\nHTML文件已保存到: {}", output_path);
}
