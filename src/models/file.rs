use serde::{Deserialize, Serialize};

/// 用户选中的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,      // 浏览器声明的类型，仅供参考，不参与校验
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// 文件输入框: value 是浏览器给出的路径 (例如 "C:\\fakepath\\test.png")
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    pub value: String,
    pub file: Option<SelectedFile>,
}

impl FileInput {
    pub fn with_file(value: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            value: value.into(),
            file: Some(file),
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.file = None;
    }
}

/// 上传请求: 文件内容 + 所属邮箱
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub email: String,
}

/// 上传结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub file_url: String,
    pub key: String,
}

/// 新账单表单的原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    pub bill_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}
