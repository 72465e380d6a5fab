use billed::controllers::{Overlay, OverlayContent, Route};
use billed::views::{self, BillsPage};
use billed::{AppConfig, BillStore, BilledError, BillsController, InMemoryStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// 把弹窗请求写进日志
struct LogOverlay {
    width: u32,
}

impl Overlay for LogOverlay {
    fn width(&self) -> u32 {
        self.width
    }

    fn show(&self, content: OverlayContent) {
        info!("Overlay {}: {} ({}px)", content.title, content.image_url, content.image_width);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    // 加载配置
    let config = AppConfig::from_env().map_err(BilledError::from)?;
    info!("Starting with config: {:?}", config);

    // 准备 Store
    let store = match &config.store.fixture_path {
        Some(path) => InMemoryStore::from_path(path, config.store.upload_base_url.clone()).await?,
        None => InMemoryStore::fixture().map_err(BilledError::from)?,
    };
    let store: Arc<dyn BillStore> = Arc::new(store);

    let session = config.session();
    let navigator = Arc::new(|route: Route| info!("Navigate to {}", route));
    let overlay = Arc::new(LogOverlay {
        width: config.render.overlay_width,
    });
    let controller = BillsController::new(Some(store), session, navigator, overlay);

    // 渲染列表页
    let page = controller.page().await;
    if let BillsPage::Data(bills) = &page {
        info!("Rendering {} bills", bills.len());
        if let Some(first) = views::render_rows(bills).first() {
            controller.handle_click_icon_eye(&first.action);
        }
    }
    println!("{}", views::render(&page));

    Ok(())
}
