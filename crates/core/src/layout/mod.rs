//! The layout composer that wraps rendered pages in shells.

mod registry;
mod shells;

pub use registry::{LayoutFn, LayoutRegistry};
pub use shells::{global_shell, searchable_shell, site_layouts, GLOBAL_SHELL_CLASS, SEARCHABLE_SHELL_CLASS};
