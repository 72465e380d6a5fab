pub mod bills_ui;

pub use bills_ui::{render, render_rows, rows_html, BillsPage, EyeAction, RenderedRow};
