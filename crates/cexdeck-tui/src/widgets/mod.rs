//! Custom widget components

mod confirm_dialog;
pub mod fit;
mod hub;
pub mod modal_overlay;
mod modal_view;
mod section_list;
mod sidebar;
mod toasts;
mod top_bar;

pub use confirm_dialog::ConfirmDialog;
pub use hub::HubView;
pub use modal_view::ModalView;
pub use section_list::{ListRow, SectionList};
pub use sidebar::Sidebar;
pub use toasts::Toasts;
pub use top_bar::TopBar;
