use super::navigation::{Navigator, Overlay, OverlayContent, Route};
use crate::error::StoreResult;
use crate::models::{Bill, Session};
use crate::service::format_display;
use crate::store::BillStore;
use crate::views::{BillsPage, EyeAction};
use std::sync::Arc;

/// 账单列表页控制器
pub struct BillsController {
    store: Option<Arc<dyn BillStore>>,
    session: Session,
    navigator: Arc<dyn Navigator>,
    overlay: Arc<dyn Overlay>,
}

impl BillsController {
    pub fn new(
        store: Option<Arc<dyn BillStore>>,
        session: Session,
        navigator: Arc<dyn Navigator>,
        overlay: Arc<dyn Overlay>,
    ) -> Self {
        Self {
            store,
            session,
            navigator,
            overlay,
        }
    }

    /// 拉取账单
    ///
    /// 没有 Store 时返回 `Ok(None)`，与 "有 Store 但列表为空" 区分开。
    /// 单条日期格式化失败时保留原始字符串；列表请求失败原样向上返回。
    pub async fn fetch_bills(&self) -> StoreResult<Option<Vec<Bill>>> {
        let Some(store) = &self.store else {
            tracing::debug!("No store configured, skipping bills fetch");
            return Ok(None);
        };

        let bills = match store.list(&self.session).await {
            Ok(bills) => bills,
            Err(e) => {
                tracing::error!("Failed to list bills for {}: {}", self.session.email, e);
                return Err(e);
            }
        };

        let formatted = bills
            .into_iter()
            .map(|mut bill| {
                match format_display(&bill.date) {
                    Ok(date) => bill.date = date,
                    Err(e) => tracing::warn!("Bill {}: {}, keeping raw date", bill.id, e),
                }
                bill
            })
            .collect::<Vec<_>>();

        tracing::info!("Fetched {} bills for {}", formatted.len(), self.session.email);
        Ok(Some(formatted))
    }

    /// 拉取并转换为页面状态
    pub async fn page(&self) -> BillsPage {
        match self.fetch_bills().await {
            Ok(bills) => BillsPage::Data(bills.unwrap_or_default()),
            Err(e) => BillsPage::Error(e.to_string()),
        }
    }

    /// "Nouvelle note de frais" 按钮
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// 点击眼睛图标，在弹窗中展示票据
    pub fn handle_click_icon_eye(&self, action: &EyeAction) {
        let Some(url) = &action.file_url else {
            tracing::debug!("Eye action without file url ignored");
            return;
        };

        // 图片占弹窗一半宽度
        let image_width = self.overlay.width() / 2;
        self.overlay.show(OverlayContent {
            title: "Justificatif".to_string(),
            image_url: url.clone(),
            image_width,
        });
    }
}
