//! Path resolution for configuration and state files.

pub mod xdg_root;
