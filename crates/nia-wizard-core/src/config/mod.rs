//! Reading and editing agent configuration files.

pub mod codec;

pub use codec::{CodecError, ConfigCodec, ConfigDocument, ConfigFormat, codec_for};
