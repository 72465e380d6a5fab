use super::BillStore;
use crate::error::{BilledError, StoreError, StoreResult};
use crate::models::{Bill, BillDraft, FileUpload, Session, UploadReceipt};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::Mutex;

/// 内置示例数据
pub const FIXTURE_JSON: &str = include_str!("../../data/bills.json");

pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://localhost:3456/images";

/// 提交记录 (create 或 update)
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(BillDraft),
    Update { id: String, draft: BillDraft },
}

impl Submission {
    pub fn draft(&self) -> &BillDraft {
        match self {
            Submission::Create(draft) => draft,
            Submission::Update { draft, .. } => draft,
        }
    }
}

/// 一次性故障注入，下一次对应调用返回该消息
#[derive(Debug, Default)]
struct Failures {
    list: Option<String>,
    create: Option<String>,
    update: Option<String>,
    upload: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    bills: Vec<Bill>,
    pending_keys: HashSet<String>,   // 已上传文件但尚未 update 的 key
    uploads: Vec<FileUpload>,
    submissions: Vec<Submission>,
    list_calls: usize,
    next_id: u64,
    failures: Failures,
}

impl StoreState {
    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("bill-{:04}", self.next_id)
    }
}

/// 内存版 Store：演示程序与测试共用
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    upload_base_url: String,
}

impl InMemoryStore {
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self::seeded(bills, DEFAULT_UPLOAD_BASE_URL)
    }

    fn seeded(bills: Vec<Bill>, upload_base_url: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                bills,
                ..StoreState::default()
            }),
            upload_base_url: upload_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 从 JSON 数组加载账单
    pub fn from_json(raw: &str, upload_base_url: impl Into<String>) -> StoreResult<Self> {
        let bills: Vec<Bill> = serde_json::from_str(raw)?;
        tracing::info!("Loaded {} bills into memory store", bills.len());
        Ok(Self::seeded(bills, upload_base_url))
    }

    /// 从磁盘上的 JSON 文件加载账单
    pub async fn from_path(
        path: impl AsRef<Path>,
        upload_base_url: impl Into<String>,
    ) -> Result<Self, BilledError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(Self::from_json(&raw, upload_base_url)?)
    }

    /// 内置示例数据
    pub fn fixture() -> StoreResult<Self> {
        Self::from_json(FIXTURE_JSON, DEFAULT_UPLOAD_BASE_URL)
    }

    pub async fn fail_next_list(&self, message: impl Into<String>) {
        self.state.lock().await.failures.list = Some(message.into());
    }

    pub async fn fail_next_create(&self, message: impl Into<String>) {
        self.state.lock().await.failures.create = Some(message.into());
    }

    pub async fn fail_next_update(&self, message: impl Into<String>) {
        self.state.lock().await.failures.update = Some(message.into());
    }

    pub async fn fail_next_upload(&self, message: impl Into<String>) {
        self.state.lock().await.failures.upload = Some(message.into());
    }

    pub async fn bills(&self) -> Vec<Bill> {
        self.state.lock().await.bills.clone()
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.state.lock().await.submissions.clone()
    }

    pub async fn uploads(&self) -> Vec<FileUpload> {
        self.state.lock().await.uploads.clone()
    }

    pub async fn list_calls(&self) -> usize {
        self.state.lock().await.list_calls
    }
}

#[async_trait]
impl BillStore for InMemoryStore {
    async fn list(&self, session: &Session) -> StoreResult<Vec<Bill>> {
        let mut state = self.state.lock().await;
        state.list_calls += 1;
        if let Some(message) = state.failures.list.take() {
            return Err(StoreError::Api(message));
        }

        // 管理员看全部，员工只看自己的
        let bills = state
            .bills
            .iter()
            .filter(|b| session.is_admin() || b.email == session.email)
            .cloned()
            .collect();
        Ok(bills)
    }

    async fn create(&self, draft: &BillDraft) -> StoreResult<Bill> {
        let mut state = self.state.lock().await;
        state.submissions.push(Submission::Create(draft.clone()));
        if let Some(message) = state.failures.create.take() {
            return Err(StoreError::Api(message));
        }

        let id = state.allocate_id();
        let bill = Bill::from_draft(id, draft.clone());
        state.bills.push(bill.clone());
        tracing::info!("Bill {} created", bill.id);
        Ok(bill)
    }

    async fn update(&self, id: &str, draft: &BillDraft) -> StoreResult<Bill> {
        let mut state = self.state.lock().await;
        state.submissions.push(Submission::Update {
            id: id.to_string(),
            draft: draft.clone(),
        });
        if let Some(message) = state.failures.update.take() {
            return Err(StoreError::Api(message));
        }

        if let Some(existing) = state.bills.iter_mut().find(|b| b.id == id) {
            existing.apply_draft(draft.clone());
            tracing::info!("Bill {} updated", id);
            return Ok(existing.clone());
        }

        // 上传文件时分配的 key 第一次 update 时落为账单
        if state.pending_keys.remove(id) {
            let bill = Bill::from_draft(id, draft.clone());
            state.bills.push(bill.clone());
            tracing::info!("Bill {} created from uploaded file", id);
            return Ok(bill);
        }

        Err(StoreError::NotFound(id.to_string()))
    }

    async fn upload(&self, file: &FileUpload) -> StoreResult<UploadReceipt> {
        let mut state = self.state.lock().await;
        state.uploads.push(file.clone());
        if let Some(message) = state.failures.upload.take() {
            return Err(StoreError::Api(message));
        }

        let key = state.allocate_id();
        state.pending_keys.insert(key.clone());
        let file_url = format!("{}/{}/{}", self.upload_base_url, key, file.file_name);
        tracing::info!("Stored {} ({} bytes) for {}", file.file_name, file.bytes.len(), file.email);
        Ok(UploadReceipt { file_url, key })
    }
}
