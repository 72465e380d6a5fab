use std::fmt;

/// 页面路由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// 页面跳转回调
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route) + Send + Sync,
{
    fn navigate(&self, route: Route) {
        self(route)
    }
}

/// 弹窗内容: 票据图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayContent {
    pub title: String,
    pub image_url: String,
    pub image_width: u32,
}

/// 弹窗能力
pub trait Overlay: Send + Sync {
    /// 弹窗宽度 (像素)
    fn width(&self) -> u32;

    fn show(&self, content: OverlayContent);
}
