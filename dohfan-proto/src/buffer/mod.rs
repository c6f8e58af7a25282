pub mod reader;
pub mod writer;

pub use reader::{PacketReader, ReaderError};
pub use writer::{PacketWriter, WriterError};
