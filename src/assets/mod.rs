/// Image decoding to premultiplied RGBA8.
pub mod decode;
/// Asynchronous image loading.
pub mod loader;
/// Image source references and URI handling.
pub mod source;
