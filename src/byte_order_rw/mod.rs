mod byte_order_reader;

pub use byte_order_reader::{ByteOrder, ByteOrderReader, Checkpoint};
