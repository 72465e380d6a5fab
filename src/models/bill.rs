use bigdecimal::BigDecimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 默认税率百分比
pub const DEFAULT_PCT: u32 = 20;

fn default_pct() -> u32 {
    DEFAULT_PCT
}

/// 账单审批状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 报销单 (Bill)，字段名与后端 JSON 保持一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    #[serde(default)]
    pub name: String,
    pub date: String,          // "YYYY-MM-DD" 或 "DD mon. YY"
    pub amount: BigDecimal,    // 金额 (€)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_decimal",
        serialize_with = "serialize_optional_decimal"
    )]
    pub vat: Option<BigDecimal>,
    #[serde(default = "default_pct")]
    pub pct: u32,
    pub status: BillStatus,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Bill {
    /// 由 Store 分配 id 后生成完整账单
    pub fn from_draft(id: impl Into<String>, draft: BillDraft) -> Self {
        Self {
            id: id.into(),
            bill_type: draft.bill_type,
            name: draft.name,
            date: draft.date,
            amount: draft.amount,
            vat: draft.vat,
            pct: draft.pct,
            status: draft.status,
            commentary: draft.commentary,
            file_url: draft.file_url,
            file_name: draft.file_name,
            email: draft.email,
            comment_admin: None,
        }
    }

    /// 覆盖员工可编辑的字段，保留 id 与管理员备注
    pub fn apply_draft(&mut self, draft: BillDraft) {
        let id = std::mem::take(&mut self.id);
        let comment_admin = self.comment_admin.take();
        *self = Self::from_draft(id, draft);
        self.comment_admin = comment_admin;
    }
}

/// 表单提交的账单内容 (尚无 id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: BigDecimal,
    pub date: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_decimal",
        serialize_with = "serialize_optional_decimal"
    )]
    pub vat: Option<BigDecimal>,
    pub pct: u32,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
}

// 后端用空字符串表示没有 VAT
fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => BigDecimal::from_str(s.trim())
            .map(Some)
            .map_err(de::Error::custom),
        Some(serde_json::Value::Number(n)) => BigDecimal::from_str(&n.to_string())
            .map(Some)
            .map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!(
            "expected a number or a string, got {}",
            other
        ))),
    }
}

fn serialize_optional_decimal<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_record() {
        let raw = r#"{
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "vat": "",
            "amount": 100,
            "name": "test1",
            "fileName": "1592770761.jpeg",
            "commentary": "plop",
            "type": "Transports",
            "email": "a@a",
            "fileUrl": "https://test.storage.tld/1592770761.jpeg",
            "date": "2001-01-01",
            "status": "refused",
            "commentAdmin": "en fait non"
        }"#;
        let bill: Bill = serde_json::from_str(raw).unwrap();

        assert_eq!(bill.bill_type, "Transports");
        assert_eq!(bill.vat, None);
        assert_eq!(bill.pct, DEFAULT_PCT);
        assert_eq!(bill.status, BillStatus::Refused);
        assert_eq!(bill.amount, BigDecimal::from(100));
        assert_eq!(bill.comment_admin.as_deref(), Some("en fait non"));
    }

    #[test]
    fn rejects_unknown_status() {
        let raw = r#"{"id":"1","type":"Transports","date":"2001-01-01","amount":1,"status":"archived"}"#;
        assert!(serde_json::from_str::<Bill>(raw).is_err());
    }

    #[test]
    fn vat_accepts_number_or_string() {
        let raw = r#"{"id":"1","type":"Transports","date":"2001-01-01","amount":1,"status":"pending","vat":"80"}"#;
        let bill: Bill = serde_json::from_str(raw).unwrap();
        assert_eq!(bill.vat, Some(BigDecimal::from(80)));

        let raw = r#"{"id":"1","type":"Transports","date":"2001-01-01","amount":1,"status":"pending","vat":70}"#;
        let bill: Bill = serde_json::from_str(raw).unwrap();
        assert_eq!(bill.vat, Some(BigDecimal::from(70)));
    }

    #[test]
    fn apply_draft_keeps_id_and_admin_comment() {
        let raw = r#"{"id":"47qAXb","type":"Transports","date":"2004-04-04","amount":400,"status":"refused","commentAdmin":"ok"}"#;
        let mut bill: Bill = serde_json::from_str(raw).unwrap();
        let draft = BillDraft {
            email: "a@a".to_string(),
            bill_type: "Restaurants et bars".to_string(),
            name: "dîner".to_string(),
            amount: BigDecimal::from(42),
            date: "2022-05-01".to_string(),
            vat: None,
            pct: 20,
            commentary: String::new(),
            file_url: None,
            file_name: None,
            status: BillStatus::Pending,
        };

        bill.apply_draft(draft);

        assert_eq!(bill.id, "47qAXb");
        assert_eq!(bill.comment_admin.as_deref(), Some("ok"));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.bill_type, "Restaurants et bars");
    }
}
