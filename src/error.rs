use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入目录里没有任何题库文件（批量转换的终止性错误）
    #[error("没有找到任何题库文件: {path}")]
    NoInput { path: String },

    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },

    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置解析失败
    #[error("配置解析失败: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_message() {
        let err = AppError::NoInput {
            path: "questions".to_string(),
        };
        assert_eq!(err.to_string(), "没有找到任何题库文件: questions");
    }
}
