//! 用户准备：登录或注册固定的测试用户，收集令牌

use rand::Rng;
use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::catalog::Variant;
use crate::client::{ApiResponse, BackendClient};
use crate::config::PacingConfig;
use crate::model::{AuthData, CreatedUser, Envelope, LoginRequest, UserTemplate};
use crate::tokens::TokenBook;

/// 用户阶段的结果
#[derive(Debug, Clone, Default)]
pub struct ProvisionedUsers {
    pub users: Vec<CreatedUser>,
    pub tokens: TokenBook,
}

impl ProvisionedUsers {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn record(&mut self, data: AuthData) {
        self.tokens.insert(data.user.email.clone(), data.token);
        match self.users.iter_mut().find(|u| u.email == data.user.email) {
            Some(existing) => *existing = data.user,
            None => self.users.push(data.user),
        }
    }
}

/// 单个用户的一次尝试
enum Attempt {
    /// 已登录、已注册或已确认失败
    Settled,
    RateLimited,
}

/// 用户准备流程
pub struct UserProvisioner<'a, R: Rng + ?Sized> {
    client: &'a BackendClient,
    variant: Variant,
    password: &'a str,
    pacing: &'a PacingConfig,
    rng: &'a mut R,
    provisioned: ProvisionedUsers,
}

impl<'a, R: Rng + ?Sized> UserProvisioner<'a, R> {
    pub fn new(
        client: &'a BackendClient,
        variant: Variant,
        password: &'a str,
        pacing: &'a PacingConfig,
        rng: &'a mut R,
    ) -> Self {
        Self {
            client,
            variant,
            password,
            pacing,
            rng,
            provisioned: ProvisionedUsers::default(),
        }
    }

    /// 依次处理目录中的所有用户
    pub async fn run(mut self) -> ProvisionedUsers {
        let templates = self.variant.user_templates();

        match self.variant {
            Variant::Simple => info!("Creating {} test users...", templates.len()),
            Variant::Working => info!("Creating/authenticating users..."),
        }

        for template in templates {
            self.provision_one(template).await;
        }

        if self.variant == Variant::Working {
            info!(
                "✅ Authenticated {} users successfully",
                self.provisioned.users.len()
            );
        }

        self.provisioned
    }

    async fn provision_one(&mut self, template: &UserTemplate) {
        let mut retries = 0;

        loop {
            match self.attempt(template).await {
                Attempt::Settled => {
                    sleep(self.pacing.user_delay()).await;
                    return;
                }
                Attempt::RateLimited => {
                    warn!(
                        "⏸️ Rate limited, waiting {} seconds...",
                        self.pacing.rate_limit_pause().as_secs()
                    );
                    sleep(self.pacing.rate_limit_pause()).await;

                    if retries >= self.pacing.max_rate_limit_retries {
                        warn!("⏭️ Skipped: {} (still rate limited)", template.email());
                        return;
                    }
                    retries += 1;
                }
            }
        }
    }

    async fn attempt(&mut self, template: &UserTemplate) -> Attempt {
        let email = template.email();

        if self.variant == Variant::Working {
            let login = LoginRequest {
                email: email.clone(),
                password: self.password.to_string(),
            };

            match self.client.post("/auth/login", &login, None).await {
                Some(resp) if resp.status == StatusCode::OK => {
                    if self.accept(&resp, &email) {
                        info!("✅ Logged in: {} ({})", email, template.role);
                    }
                    return Attempt::Settled;
                }
                Some(resp) if resp.is_rate_limited() => return Attempt::RateLimited,
                _ => {}
            }
        }

        let request = self
            .variant
            .register_request(template, self.password, &mut *self.rng);

        match self.client.post("/auth/register", &request, None).await {
            Some(resp) if resp.status == StatusCode::CREATED => {
                if self.accept(&resp, &email) {
                    info!("✅ Created: {} ({})", email, template.role);
                }
                Attempt::Settled
            }
            Some(resp) if resp.is_rate_limited() && self.handles_rate_limit() => {
                Attempt::RateLimited
            }
            Some(resp) => {
                error!("❌ Failed: {} - {}", email, resp.error_message("Unknown error"));
                Attempt::Settled
            }
            None => {
                error!("❌ Failed: {} - No response", email);
                Attempt::Settled
            }
        }
    }

    fn handles_rate_limit(&self) -> bool {
        self.variant == Variant::Working
    }

    /// 解析认证响应并记录用户和令牌
    fn accept(&mut self, resp: &ApiResponse, email: &str) -> bool {
        match resp.json::<Envelope<AuthData>>() {
            Ok(envelope) => {
                self.provisioned.record(envelope.data);
                true
            }
            Err(e) => {
                error!("❌ Failed: {} - {}", email, e);
                false
            }
        }
    }
}
