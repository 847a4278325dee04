//! UI Components

mod button;
mod create_form;
mod duplicate_dialog;
mod resource_list;
mod sidebar;
mod toast_stack;
mod toolbar;

pub use create_form::CreateForm;
pub use resource_list::ResourceList;
pub use sidebar::Sidebar;
pub use toast_stack::ToastStack;
pub use toolbar::Toolbar;
