use super::navigation::{Navigator, Route};
use crate::error::FormError;
use crate::models::{
    BillDraft, BillStatus, FileInput, FileUpload, NewBillForm, Session, DEFAULT_PCT,
};
use crate::service::date::parse_int_prefix;
use crate::store::BillStore;
use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;
use std::sync::Arc;

/// 文件类型错误提示
pub const FILE_ERROR_TEXT: &str = "Merci d'uploader uniquement un fichier jpg, jpeg ou png";

/// 允许上传的扩展名 (不看 MIME)
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 一次提交的生命周期
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewBillState {
    Idle,
    FileSelected,
    FileAccepted,
    FileRejected,
    Submitting,
    Submitted,
    SubmitFailed { message: String },
}

/// 文件错误提示元素
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileErrorMessage {
    pub visible: bool,
    pub text: String,
}

impl FileErrorMessage {
    fn show(&mut self, text: &str) {
        self.visible = true;
        self.text = text.to_string();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.text.clear();
    }
}

/// 新建账单表单控制器
pub struct NewBillController {
    store: Arc<dyn BillStore>,
    session: Session,
    navigator: Arc<dyn Navigator>,
    state: NewBillState,
    file_error: FileErrorMessage,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
    upload_error: Option<String>,
}

impl NewBillController {
    pub fn new(store: Arc<dyn BillStore>, session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            session,
            navigator,
            state: NewBillState::Idle,
            file_error: FileErrorMessage::default(),
            file_url: None,
            file_name: None,
            bill_id: None,
            upload_error: None,
        }
    }

    pub fn state(&self) -> &NewBillState {
        &self.state
    }

    pub fn file_error(&self) -> &FileErrorMessage {
        &self.file_error
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    /// 最近一次上传失败的消息
    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    /// 选择文件: 校验扩展名，合法则上传
    pub async fn handle_change_file(&mut self, input: &mut FileInput) {
        let Some(mut file) = input.file.take() else {
            tracing::debug!("File input changed without a file");
            return;
        };
        self.state = NewBillState::FileSelected;

        // 1. 文件名取路径最后一段
        let file_name = input
            .value
            .rsplit('\\')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(file.name.as_str())
            .to_string();

        // 2. 校验扩展名
        if !has_allowed_extension(&file_name) {
            tracing::info!("Rejected file {} ({})", file_name, file.mime);
            self.file_error.show(FILE_ERROR_TEXT);
            input.clear();
            self.file_url = None;
            self.file_name = None;
            self.state = NewBillState::FileRejected;
            return;
        }
        self.file_error.hide();

        // 3. 上传，字节借给请求后放回输入框
        let upload = FileUpload {
            file_name: file_name.clone(),
            bytes: std::mem::take(&mut file.bytes),
            email: self.session.email.clone(),
        };
        let result = self.store.upload(&upload).await;
        file.bytes = upload.bytes;
        input.file = Some(file);

        match result {
            Ok(receipt) => {
                tracing::info!("Uploaded {} as {}", file_name, receipt.key);
                self.bill_id = Some(receipt.key);
                self.file_url = Some(receipt.file_url);
                self.file_name = Some(file_name);
                self.upload_error = None;
                self.state = NewBillState::FileAccepted;
            }
            Err(e) => {
                // 上一次上传的结果作废，状态停在 FileSelected
                tracing::error!("Upload of {} failed: {}", file_name, e);
                self.bill_id = None;
                self.file_url = None;
                self.file_name = None;
                self.upload_error = Some(e.to_string());
            }
        }
    }

    /// 提交表单: 成功后跳回列表，失败留在表单页
    pub async fn handle_submit(&mut self, form: &NewBillForm) {
        let draft = match self.build_draft(form) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("New bill form rejected: {}", e);
                self.state = NewBillState::SubmitFailed {
                    message: e.to_string(),
                };
                return;
            }
        };

        self.state = NewBillState::Submitting;
        let result = match &self.bill_id {
            Some(id) => self.store.update(id, &draft).await,
            None => self.store.create(&draft).await,
        };

        match result {
            Ok(bill) => {
                tracing::info!("Bill {} submitted by {}", bill.id, draft.email);
                self.state = NewBillState::Submitted;
                self.navigator.navigate(Route::Bills);
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.state = NewBillState::SubmitFailed {
                    message: e.to_string(),
                };
            }
        }
    }

    /// 由表单字段构造账单，状态固定为 pending
    pub fn build_draft(&self, form: &NewBillForm) -> Result<BillDraft, FormError> {
        let amount = parse_decimal(&form.amount)
            .ok_or_else(|| FormError::InvalidAmount(form.amount.clone()))?;

        let vat = if form.vat.trim().is_empty() {
            None
        } else {
            Some(parse_decimal(&form.vat).ok_or_else(|| FormError::InvalidVat(form.vat.clone()))?)
        };

        Ok(BillDraft {
            email: self.session.email.clone(),
            bill_type: form.bill_type.clone(),
            name: form.name.clone(),
            amount,
            date: form.date.clone(),
            vat,
            pct: parse_pct(&form.pct),
            commentary: form.commentary.clone(),
            file_url: self.file_url.clone(),
            file_name: self.file_name.clone(),
            status: BillStatus::Pending,
        })
    }
}

fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// 非负十进制数
fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(raw.trim())
        .ok()
        .filter(|value| *value >= BigDecimal::zero())
}

/// 空、无法解析、0 或负数都取默认值 20
fn parse_pct(raw: &str) -> u32 {
    parse_int_prefix(raw)
        .and_then(|pct| u32::try_from(pct).ok())
        .filter(|pct| *pct > 0)
        .unwrap_or(DEFAULT_PCT)
}
