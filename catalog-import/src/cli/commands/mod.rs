pub mod preview;
pub mod template;
