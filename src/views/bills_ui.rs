use crate::models::Bill;
use crate::service::{amount_label, normalize, status_label};
use std::cmp::Reverse;

/// 账单列表页的三种状态
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPage {
    Loading,
    Error(String),
    Data(Vec<Bill>),
}

/// 查看票据的 "眼睛" 按钮；没有 URL 时不可用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeAction {
    pub file_url: Option<String>,
}

impl EyeAction {
    pub fn new(file_url: Option<&str>) -> Self {
        Self {
            file_url: file_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file_url.is_some()
    }
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub bill_type: String,
    pub name: String,
    pub date: String,      // 原始日期字符串，不做归一化
    pub amount: String,
    pub status: String,
    pub action: EyeAction,
}

impl RenderedRow {
    fn from_bill(bill: &Bill) -> Self {
        Self {
            bill_type: bill.bill_type.clone(),
            name: bill.name.clone(),
            date: bill.date.clone(),
            amount: amount_label(&bill.amount),
            status: status_label(bill.status).to_string(),
            action: EyeAction::new(bill.file_url.as_deref()),
        }
    }
}

/// 按日期降序 (最新在前) 生成表格行，日期相同保持输入顺序
pub fn render_rows(bills: &[Bill]) -> Vec<RenderedRow> {
    let mut sorted: Vec<&Bill> = bills.iter().collect();
    sorted.sort_by_cached_key(|bill| Reverse(normalize(&bill.date)));
    sorted.into_iter().map(RenderedRow::from_bill).collect()
}

pub fn rows_html(bills: &[Bill]) -> String {
    render_rows(bills).iter().map(row_html).collect()
}

fn row_html(row: &RenderedRow) -> String {
    format!(
        r#"
    <tr>
      <td>{}</td>
      <td>{}</td>
      <td>{}</td>
      <td>{}</td>
      <td>{}</td>
      <td>
        {}
      </td>
    </tr>"#,
        escape(&row.bill_type),
        escape(&row.name),
        escape(&row.date),
        escape(&row.amount),
        escape(&row.status),
        actions_html(&row.action),
    )
}

fn actions_html(action: &EyeAction) -> String {
    match &action.file_url {
        Some(url) => format!(
            r#"<div class="icon-actions"><div id="eye" data-testid="icon-eye" data-bill-url="{}">voir</div></div>"#,
            escape(url)
        ),
        None => r#"<div class="icon-actions"><div id="eye" data-testid="icon-eye" class="disabled" aria-disabled="true">voir</div></div>"#
            .to_string(),
    }
}

/// 渲染整页
pub fn render(page: &BillsPage) -> String {
    match page {
        BillsPage::Loading => loading_page(),
        BillsPage::Error(message) => error_page(message),
        BillsPage::Data(bills) => bills_page(bills),
    }
}

fn loading_page() -> String {
    r#"<div class='content' id='loading'>Loading...</div>"#.to_string()
}

fn error_page(message: &str) -> String {
    format!(
        r#"
    <div class='layout'>
      <div class='content'>
        <div class='content-header'>
          <div class='content-title'> Erreur </div>
        </div>
        <div data-testid="error-message">{}</div>
      </div>
    </div>"#,
        escape(message)
    )
}

fn bills_page(bills: &[Bill]) -> String {
    format!(
        r#"
    <div class='layout'>
      <div class='content'>
        <div class='content-header'>
          <div class='content-title'> Mes notes de frais </div>
          <button type="button" data-testid='btn-new-bill' class="btn btn-primary">Nouvelle note de frais</button>
        </div>
        <div id="data-table">
        <table id="example" class="table table-striped" style="width:100%">
          <thead>
              <tr>
                <th>Type</th>
                <th>Nom</th>
                <th>Date</th>
                <th>Montant</th>
                <th>Statut</th>
                <th>Actions</th>
              </tr>
          </thead>
          <tbody data-testid="tbody">{}
          </tbody>
          </table>
        </div>
      </div>
      <div class="modal fade" id="modaleFile" tabindex="-1" role="dialog" aria-hidden="true">
        <div class="modal-dialog modal-dialog-centered modal-lg" role="document">
          <div class="modal-content">
            <div class="modal-header">
              <h5 class="modal-title">Justificatif</h5>
            </div>
            <div class="modal-body">
            </div>
          </div>
        </div>
      </div>
    </div>"#,
        rows_html(bills)
    )
}

/// HTML 转义
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
