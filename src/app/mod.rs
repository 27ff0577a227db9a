pub mod render_service;
pub mod source;
