pub mod bill;
pub mod file;
pub mod session;

pub use bill::{Bill, BillDraft, BillStatus, DEFAULT_PCT};
pub use file::{FileInput, FileUpload, NewBillForm, SelectedFile, UploadReceipt};
pub use session::{Session, UserRole};
