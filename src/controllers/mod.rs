pub mod bills;
pub mod navigation;
pub mod new_bill;

pub use bills::BillsController;
pub use navigation::{Navigator, Overlay, OverlayContent, Route};
pub use new_bill::{FileErrorMessage, NewBillController, NewBillState, FILE_ERROR_TEXT};
