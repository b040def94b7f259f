//! View composition for the desktop shell, centered on the day schedule grid.

mod create_form;
mod grid;
mod layout;
mod status;
mod styles;
mod toolbar;

pub(crate) use layout::compose as compose_root;
