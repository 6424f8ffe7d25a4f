//! Workflow modules. The application wizard is the only workflow this crate
//! owns; listing/detail surfaces live entirely in the host.

pub mod application;
