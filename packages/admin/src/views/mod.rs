mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod controls;
pub use controls::Controls;

mod tickets;
pub use tickets::Tickets;

mod documents;
pub use documents::Documents;

mod new_document;
pub use new_document::NewDocument;

mod document_detail;
pub use document_detail::DocumentDetail;

mod vendors;
pub use vendors::Vendors;

mod vendor_detail;
pub use vendor_detail::VendorDetail;
