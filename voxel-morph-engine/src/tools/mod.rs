pub mod selector;
pub mod status_text;
