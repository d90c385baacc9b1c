//! 商品准备：按目录逐个创建商品

use rand::Rng;
use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::catalog::Variant;
use crate::client::BackendClient;
use crate::config::PacingConfig;
use crate::model::Envelope;
use crate::tokens::TokenBook;

/// 后端提示商品重复时的关键字
const DUPLICATE_MARKER: &str = "already exists";

/// 商品阶段的结果
#[derive(Debug, Clone, Default)]
pub struct ProvisionedProducts {
    /// 后端返回的商品记录
    pub created: Vec<serde_json::Value>,
    pub skipped: usize,
    pub failed: usize,
}

/// 选择本次请求使用的令牌
fn pick_token(variant: Variant, tokens: &TokenBook, index: usize) -> Option<&str> {
    match variant {
        Variant::Simple => tokens.round_robin(index),
        Variant::Working => tokens.first(),
    }
}

/// 依次创建目录中的商品，每个请求之间按配置停顿
pub async fn provision_products<R: Rng + ?Sized>(
    client: &BackendClient,
    variant: Variant,
    tokens: &TokenBook,
    pacing: &PacingConfig,
    rng: &mut R,
) -> ProvisionedProducts {
    let mut result = ProvisionedProducts::default();

    match variant {
        Variant::Simple => info!("Creating sample products..."),
        Variant::Working => info!("Creating product catalog..."),
    }

    for (index, template) in variant.product_catalog().iter().enumerate() {
        let product = variant.product_request(template, rng);
        let token = pick_token(variant, tokens, index);

        match client.post("/products", &product, token).await {
            Some(resp) if resp.status == StatusCode::CREATED => {
                match resp.json::<Envelope<serde_json::Value>>() {
                    Ok(envelope) => {
                        result.created.push(envelope.data);
                        info!("✅ Created product: {}", product.name);
                    }
                    Err(e) => {
                        result.failed += 1;
                        error!("❌ Failed to create product {}: {}", product.name, e);
                    }
                }
            }
            Some(resp) => {
                let message = resp.error_message(match variant {
                    Variant::Simple => format!("HTTP {}", resp.status.as_u16()),
                    Variant::Working => "Unknown error".to_string(),
                });

                if message.contains(DUPLICATE_MARKER) {
                    result.skipped += 1;
                    warn!("⏭️ Skipped: {} (already exists)", product.name);
                } else {
                    result.failed += 1;
                    error!("❌ Failed to create product {}: {}", product.name, message);
                }
            }
            None => {
                result.failed += 1;
                error!("❌ Failed to create product {}: No response", product.name);
            }
        }

        sleep(pacing.product_delay()).await;
    }

    result
}
