//! WAV binary encoding

mod encoder;

pub use encoder::encode;
