//! 运行编排：健康检查 → 用户 → 商品 → 汇总

use rand::Rng;
use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::catalog::Variant;
use crate::client::BackendClient;
use crate::config::{Config, PacingConfig};
use crate::error::Result;
use crate::model::CreatedUser;
use crate::products::{provision_products, ProvisionedProducts};
use crate::tokens::TokenBook;
use crate::users::UserProvisioner;

/// 一次运行的结局
#[derive(Debug)]
pub enum RunOutcome {
    /// 健康检查未通过，没有发出其他请求
    BackendUnavailable,
    /// 没有任何可用用户，没有创建商品
    NoUsers,
    Completed(RunSummary),
}

/// 运行结束后的统计
#[derive(Debug)]
pub struct RunSummary {
    pub variant: Variant,
    pub users: Vec<CreatedUser>,
    pub tokens: TokenBook,
    pub products: ProvisionedProducts,
}

/// 测试数据生成器
pub struct DataGenerator {
    client: BackendClient,
    variant: Variant,
    password: String,
    pacing: PacingConfig,
}

impl DataGenerator {
    pub fn new(variant: Variant, config: &Config) -> Result<Self> {
        let pacing = match variant {
            Variant::Simple => config.simple.clone(),
            Variant::Working => config.working.clone(),
        };

        Ok(Self {
            client: BackendClient::new(&config.api)?,
            variant,
            password: config.api.password.clone(),
            pacing,
        })
    }

    /// 执行完整的生成流程并打印汇总
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> RunOutcome {
        match self.variant {
            Variant::Simple => info!("🚀 Starting Simple Test Data Generation"),
            Variant::Working => info!("🚀 Starting Rapid Sort Data Generation"),
        }
        info!("{}", self.rule());

        if !self.backend_is_up().await {
            self.report_backend_down();
            return RunOutcome::BackendUnavailable;
        }
        info!("✅ Backend server is running");

        let provisioned =
            UserProvisioner::new(&self.client, self.variant, &self.password, &self.pacing, rng)
                .run()
                .await;

        if provisioned.is_empty() {
            match self.variant {
                Variant::Simple => error!("❌ No users created, stopping..."),
                Variant::Working => error!("❌ No users created, stopping generation"),
            }
            return RunOutcome::NoUsers;
        }

        sleep(self.pacing.settle_delay()).await;

        let products =
            provision_products(&self.client, self.variant, &provisioned.tokens, &self.pacing, rng)
                .await;

        let summary = RunSummary {
            variant: self.variant,
            users: provisioned.users,
            tokens: provisioned.tokens,
            products,
        };
        self.print_summary(&summary);

        RunOutcome::Completed(summary)
    }

    async fn backend_is_up(&self) -> bool {
        matches!(
            self.client.get("/health", None).await,
            Some(resp) if resp.status == StatusCode::OK
        )
    }

    /// 不带 `/api` 后缀的服务器地址
    fn server_url(&self) -> &str {
        let base = self.client.base_url();
        base.strip_suffix("/api").unwrap_or(base)
    }

    fn rule(&self) -> String {
        match self.variant {
            Variant::Simple => "=".repeat(50),
            Variant::Working => "=".repeat(60),
        }
    }

    fn report_backend_down(&self) {
        match self.variant {
            Variant::Simple => {
                error!("❌ Backend server not running on {}", self.server_url());
                error!("Please start: npm run start:backend");
            }
            Variant::Working => {
                error!("❌ Backend server is not running on {}", self.server_url());
                error!("   Please start the backend: cd backend && npm run dev");
            }
        }
    }

    fn print_summary(&self, summary: &RunSummary) {
        let rule = self.rule();
        let users = summary.users.len();
        let products = summary.products.created.len();

        info!("{}", rule);
        match self.variant {
            Variant::Simple => {
                info!("📊 Generation Summary:");
                info!("   👥 Users created: {}", users);
                info!("   📦 Products created: {}", products);
                info!("{}", rule);
                info!("✅ Simple data generation completed!");
                info!(
                    "🌐 Login credentials (all use password: {}):",
                    self.password
                );
                for user in &summary.users {
                    info!("   📧 {} - {} ({})", user.email, user.role, user.department);
                }
            }
            Variant::Working => {
                info!("📊 Data Generation Summary:");
                info!("   👥 Users created/authenticated: {}", users);
                info!("   📦 Products created: {}", products);
                if summary.products.skipped > 0 {
                    info!("   ⏭️  Products skipped: {}", summary.products.skipped);
                }
                warn!("   ⚠️  Orders: Skipped (backend endpoint issues)");
                info!("{}", rule);
                info!("✅ Data generation completed successfully!");

                info!("");
                info!("🌐 Login Credentials (password: {}):", self.password);
                for user in &summary.users {
                    info!(
                        "   {} {} - {} ({})",
                        user.role_marker(),
                        user.email,
                        user.role,
                        user.department
                    );
                }

                info!("");
                info!("🎯 Next Steps:");
                info!("   1. Open your frontend application");
                info!("   2. Login with any of the above credentials");
                info!("   3. Explore the inventory management features");
                info!("   4. View the created products in the system");
            }
        }
    }
}
