pub mod banner;
pub mod frame;
