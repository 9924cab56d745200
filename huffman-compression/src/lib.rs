pub mod bits;
pub mod codec;
pub mod encoder;
pub mod error;
mod persist;
pub mod prefix_code_table;

pub use encoder::ReusableHuffman;
pub use error::HuffmanError;
pub use prefix_code_table::{CodeTable, ETB_CHAR};
