pub mod ease;
pub mod scope;
pub mod timeline;
