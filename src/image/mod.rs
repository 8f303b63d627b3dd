//! Image decoding and deterministic preprocessing.

mod decode;
mod frame;
mod preprocess;

pub use decode::decode_image;
pub use frame::{ChannelOrder, Frame};
pub use preprocess::{PreprocessSpec, preprocess};
