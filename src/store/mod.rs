pub mod memory;

use crate::error::StoreResult;
use crate::models::{Bill, BillDraft, FileUpload, Session, UploadReceipt};
use async_trait::async_trait;

pub use memory::InMemoryStore;

/// 账单后端能力接口
#[async_trait]
pub trait BillStore: Send + Sync {
    /// 当前会话可见的全部账单
    async fn list(&self, session: &Session) -> StoreResult<Vec<Bill>>;

    /// 新建账单，id 由 Store 分配
    async fn create(&self, draft: &BillDraft) -> StoreResult<Bill>;

    async fn update(&self, id: &str, draft: &BillDraft) -> StoreResult<Bill>;

    /// 上传票据文件
    async fn upload(&self, file: &FileUpload) -> StoreResult<UploadReceipt>;
}
