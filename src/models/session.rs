use serde::{Deserialize, Serialize};

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Employee,
    Admin,
}

/// 当前登录用户，构造控制器时显式传入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserRole,
    pub email: String,
}

impl Session {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserRole::Employee,
            email: email.into(),
        }
    }

    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            user_type: UserRole::Admin,
            email: email.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserRole::Admin
    }
}
