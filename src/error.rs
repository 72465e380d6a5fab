use thiserror::Error;

/// Store 调用错误 (消息原样透传给界面)
#[derive(Debug, Error)]
pub enum StoreError {
    /// 后端返回的错误，Display 只输出消息本身，例如 "Erreur 404"
    #[error("{0}")]
    Api(String),

    #[error("Bill {0} not found")]
    NotFound(String),

    #[error("Invalid bill payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 单条账单日期格式化失败 (调用方回退为原始字符串)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Unparseable date: {0}")]
    Unparseable(String),
}

/// 表单校验错误，不会到达 Store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid VAT: {0:?}")]
    InvalidVat(String),
}

/// 二进制入口使用的顶层错误
#[derive(Debug, Error)]
pub enum BilledError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
