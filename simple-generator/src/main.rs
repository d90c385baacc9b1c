use anyhow::Result;
use rapidseed::{config, logging::init_logging, DataGenerator, RunOutcome, Variant};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化配置系统
    config::init_config()?;
    let config = config::get_config()?;

    // 初始化日志系统，guard 需要活到进程结束
    let _guard = init_logging(&config.logging, "simple_data_generator")?;

    let generator = DataGenerator::new(Variant::Simple, config)?;
    let mut rng = rand::rng();

    // 提前终止同样以 0 退出
    match generator.run(&mut rng).await {
        RunOutcome::Completed(summary) => debug!(
            "生成完成: {} 个用户, {} 个商品",
            summary.users.len(),
            summary.products.created.len()
        ),
        outcome => debug!("生成提前结束: {:?}", outcome),
    }

    Ok(())
}
