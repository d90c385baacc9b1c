//! 请求与响应的数据模型
//!
//! 字段名与后端 API 的 camelCase JSON 保持一致。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 固定的用户模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTemplate {
    pub first_name: &'static str,
    pub last_name: &'static str,
    /// 固定邮箱；为空时由姓名推导
    pub email: Option<&'static str>,
    pub role: Role,
    pub department: &'static str,
}

impl UserTemplate {
    /// 用户邮箱：优先使用固定邮箱，否则为 `first.last@rapidsort.com`
    pub fn email(&self) -> String {
        match self.email {
            Some(email) => email.to_string(),
            None => format!(
                "{}.{}@rapidsort.com",
                self.first_name.to_lowercase(),
                self.last_name.to_lowercase()
            ),
        }
    }
}

/// `POST /auth/register` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department: String,
    pub phone: String,
}

/// `POST /auth/login` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 后端统一的 `{ data: ... }` 响应包装
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// 注册与登录成功后返回的数据
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub user: CreatedUser,
    pub token: String,
}

/// 后端返回的用户信息
///
/// 角色按原始字符串保存，后端返回未知角色或缺少部门时仍保留该用户的令牌。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedUser {
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
    /// 其余字段原样保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreatedUser {
    /// 凭据列表中使用的角色标记
    pub fn role_marker(&self) -> &'static str {
        match self.role.as_str() {
            "admin" => "👑",
            "manager" => "👔",
            _ => "👤",
        }
    }
}

/// 商品尺寸（厘米）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// `POST /products` 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub sku: String,
    pub min_stock_level: u32,
    pub max_stock_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub status: String,
}
