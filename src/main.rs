use anyhow::Result;

use question_bank_render::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::load()?;

    // 初始化并运行转换
    App::initialize(config)?.run().await?;

    Ok(())
}
