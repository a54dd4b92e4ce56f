pub mod decode;
pub mod prerender;
