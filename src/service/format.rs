use crate::models::BillStatus;
use bigdecimal::BigDecimal;

/// 状态的显示文本
pub fn status_label(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

/// 金额加货币符号
pub fn amount_label(amount: &BigDecimal) -> String {
    format!("{} €", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn labels() {
        assert_eq!(status_label(BillStatus::Pending), "En attente");
        assert_eq!(status_label(BillStatus::Refused), "Refusé");
        assert_eq!(amount_label(&BigDecimal::from(400)), "400 €");
        assert_eq!(amount_label(&BigDecimal::from_str("12.50").unwrap()), "12.50 €");
    }
}
