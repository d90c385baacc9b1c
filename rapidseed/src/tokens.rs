//! 邮箱到令牌的映射，按插入顺序保存

/// 本次运行中取得的 Bearer 令牌
#[derive(Debug, Clone, Default)]
pub struct TokenBook {
    entries: Vec<(String, String)>,
}

impl TokenBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录令牌；同一邮箱再次写入时原位替换
    pub fn insert(&mut self, email: impl Into<String>, token: impl Into<String>) {
        let email = email.into();
        let token = token.into();
        match self.entries.iter_mut().find(|(e, _)| *e == email) {
            Some(entry) => entry.1 = token,
            None => self.entries.push((email, token)),
        }
    }

    pub fn get(&self, email: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(e, _)| e == email)
            .map(|(_, t)| t.as_str())
    }

    /// 第一个取得的令牌（目录中排在最前的是管理员）
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, t)| t.as_str())
    }

    /// 轮流使用各个用户的令牌
    pub fn round_robin(&self, index: usize) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[index % self.entries.len()].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(e, _)| e.as_str())
    }
}
