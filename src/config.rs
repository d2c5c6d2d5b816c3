use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 批量转换配置 ---
    /// 题库 txt 文件所在目录
    pub input_folder: String,
    /// 输出 HTML 文件路径
    pub output_html: String,
    /// 页面标题
    pub page_title: String,
    // --- 在线服务配置 ---
    /// 在线模式使用的题库文件
    pub questions_file: String,
    /// 监听地址
    pub bind_addr: String,
    /// SQLite 数据库地址
    pub database_url: String,
    /// 初始管理员账号
    pub admin_username: String,
    pub admin_password: String,
    pub admin_display_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "questions".to_string(),
            output_html: "output/题库合集.html".to_string(),
            page_title: "题库练习合集".to_string(),
            questions_file: "data/questions.txt".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: "sqlite:study.db?mode=rwc".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            admin_display_name: "管理员".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：可选的 config.toml 打底，环境变量覆盖
    pub fn load() -> Result<Self> {
        let mut config = if Path::new("config.toml").exists() {
            let content = std::fs::read_to_string("config.toml")
                .with_context(|| "无法读取配置文件: config.toml")?;
            toml::from_str(&content)
                .map_err(crate::error::AppError::ConfigParse)
                .with_context(|| "无法解析配置文件: config.toml")?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// 仅从环境变量加载（缺省值兜底）
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("INPUT_FOLDER") {
            self.input_folder = v;
        }
        if let Ok(v) = std::env::var("OUTPUT_HTML") {
            self.output_html = v;
        }
        if let Ok(v) = std::env::var("PAGE_TITLE") {
            self.page_title = v;
        }
        if let Ok(v) = std::env::var("QUESTIONS_FILE") {
            self.questions_file = v;
        }
        if let Ok(v) = std::env::var("BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Ok(v) = std::env::var("DATABASE_URL") {
            self.database_url = v;
        }
        if let Ok(v) = std::env::var("ADMIN_USERNAME") {
            self.admin_username = v;
        }
        if let Ok(v) = std::env::var("ADMIN_PASSWORD") {
            self.admin_password = v;
        }
        if let Ok(v) = std::env::var("ADMIN_DISPLAY_NAME") {
            self.admin_display_name = v;
        }
    }
}
