use anyhow::Result;
use rapidseed::{config, logging::init_logging, DataGenerator, RunOutcome, Variant};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化配置系统
    config::init_config()?;
    let config = config::get_config()?;

    // 初始化日志系统，guard 需要活到进程结束
    let _guard = init_logging(&config.logging, "working_data_generator")?;

    debug!(
        "后端地址: {}, 用户间隔: {:?}, 商品间隔: {:?}",
        config.api.base_url,
        config.working.user_delay(),
        config.working.product_delay()
    );

    let generator = DataGenerator::new(Variant::Working, config)?;
    let mut rng = rand::rng();

    match generator.run(&mut rng).await {
        RunOutcome::Completed(summary) => debug!(
            "生成完成: {} 个用户, {} 个商品, {} 个重复跳过",
            summary.users.len(),
            summary.products.created.len(),
            summary.products.skipped
        ),
        outcome => debug!("生成提前结束: {:?}", outcome),
    }

    Ok(())
}
