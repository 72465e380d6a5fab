use crate::models::{Session, UserRole};
use crate::store::memory::DEFAULT_UPLOAD_BASE_URL;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub store: StoreConfig,
    pub render: RenderConfig,
}

/// 当前用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub email: String,
    pub user_type: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub fixture_path: Option<String>,   // 为空时使用内置示例数据
    pub upload_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub overlay_width: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                email: "a@a".to_string(),
                user_type: UserRole::Employee,
            },
            store: StoreConfig {
                fixture_path: None,
                upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            },
            render: RenderConfig { overlay_width: 800 },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置 (例如 BILLED__SESSION__EMAIL)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("BILLED").separator("__"))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("session.email", defaults.session.email)?
            .set_default("session.user_type", "Employee")?
            .set_default("store.upload_base_url", defaults.store.upload_base_url)?
            .set_default("render.overlay_width", i64::from(defaults.render.overlay_width))?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn session(&self) -> Session {
        Session {
            user_type: self.session.user_type,
            email: self.session.email.clone(),
        }
    }
}
