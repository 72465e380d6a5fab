pub mod date;
pub mod format;

pub use date::{format_display, normalize, OrderableDate};
pub use format::{amount_label, status_label};
