use anyhow::Result;

use question_bank_render::{logger, server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::load()?;

    // 启动在线服务
    server::run(config).await?;

    Ok(())
}
