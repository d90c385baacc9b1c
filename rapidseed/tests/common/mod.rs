//! 测试用的模拟后端
//!
//! 在 127.0.0.1 的随机端口上启动 axum 服务，记录收到的每个请求。

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use rapidseed::{Config, PacingConfig};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::net::TcpListener;

/// 收到的一个请求
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Vec<String>,
    pub body: Value,
    pub at: Instant,
}

/// 模拟后端的行为与状态
#[derive(Debug)]
pub struct MockState {
    pub health_status: StatusCode,
    /// 已注册用户：邮箱 -> (密码, 用户信息)
    pub accounts: HashMap<String, (String, Value)>,
    /// 前 N 次登录请求返回 429
    pub login_rate_limits: usize,
    /// 前 N 次注册请求返回 429
    pub register_rate_limits: usize,
    /// 设置后所有注册请求都返回该状态码
    pub register_failure: Option<StatusCode>,
    /// 已存在的商品名称，重复创建返回 409
    pub existing_products: HashSet<String>,
    pub requests: Vec<Recorded>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            health_status: StatusCode::OK,
            accounts: HashMap::new(),
            login_rate_limits: 0,
            register_rate_limits: 0,
            register_failure: None,
            existing_products: HashSet::new(),
            requests: Vec::new(),
        }
    }
}

impl MockState {
    /// 预先存在一个账号
    pub fn with_account(mut self, email: &str, password: &str, role: &str, department: &str) -> Self {
        let user = json!({
            "id": format!("id-{}", email),
            "email": email,
            "role": role,
            "department": department,
        });
        self.accounts
            .insert(email.to_string(), (password.to_string(), user));
        self
    }
}

pub fn token_for(email: &str) -> String {
    format!("token-{}", email)
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockBackend {
    pub async fn start(state: MockState) -> Self {
        let state = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/api/health", get(health))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/products", post(create_product))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// 指向本模拟后端、不做任何等待的配置
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.base_url = self.base_url();
        config.api.timeout_seconds = 5;
        config.simple = PacingConfig::immediate();
        config.working = PacingConfig::immediate();
        config
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

fn record(state: &mut MockState, path: &str, headers: &HeaderMap, body: Value) {
    let authorization = headers
        .get_all(AUTHORIZATION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();

    state.requests.push(Recorded {
        path: path.to_string(),
        authorization,
        body,
        at: Instant::now(),
    });
}

fn auth_body(user: &Value) -> Value {
    let email = user["email"].as_str().unwrap_or_default();
    json!({
        "success": true,
        "data": { "user": user, "token": token_for(email) }
    })
}

async fn health(State(state): State<Shared>, headers: HeaderMap) -> StatusCode {
    let mut state = state.lock().unwrap();
    record(&mut state, "/health", &headers, Value::Null);
    state.health_status
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    record(&mut state, "/auth/login", &headers, body.clone());

    if state.login_rate_limits > 0 {
        state.login_rate_limits -= 1;
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too many requests" })),
        );
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match state.accounts.get(email) {
        Some((stored, user)) if stored == password => (StatusCode::OK, Json(auth_body(user))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        ),
    }
}

async fn register(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    record(&mut state, "/auth/register", &headers, body.clone());

    if state.register_rate_limits > 0 {
        state.register_rate_limits -= 1;
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too many requests" })),
        );
    }
    if let Some(status) = state.register_failure {
        return (status, Json(json!({ "message": "Registration disabled" })));
    }

    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.accounts.contains_key(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "User already exists" })),
        );
    }

    let user = json!({
        "id": format!("id-{}", email),
        "email": email,
        "role": body["role"],
        "department": body["department"],
        "firstName": body["firstName"],
        "lastName": body["lastName"],
    });
    let password = body["password"].as_str().unwrap_or_default().to_string();
    state
        .accounts
        .insert(email.clone(), (password, user.clone()));

    (StatusCode::CREATED, Json(auth_body(&user)))
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    record(&mut state, "/products", &headers, body.clone());

    let known_token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| {
            state
                .accounts
                .keys()
                .any(|email| token_for(email) == token)
        })
        .unwrap_or(false);
    if !known_token {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Not authorized" })),
        );
    }

    let name = body["name"].as_str().unwrap_or_default().to_string();
    if !state.existing_products.insert(name) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "message": "Product with this SKU already exists" })),
        );
    }

    let mut product = body;
    product["id"] = json!(format!("prod-{}", state.existing_products.len()));
    (StatusCode::CREATED, Json(json!({ "success": true, "data": product })))
}
