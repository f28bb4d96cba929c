pub mod frame;
pub mod layout;
