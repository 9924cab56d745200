use derive_more::{Display, Error};

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum HuffmanError {
    #[display(fmt = "symbol {:?} is not in the code table", symbol)]
    UnknownSymbol { symbol: char },
    #[display(fmt = "the message contains the reserved end of transmission character")]
    ReservedSymbol,
    #[display(
        fmt = "stream ended after {} bits without an end of transmission code",
        bits_read
    )]
    MalformedStream { bits_read: usize },
    #[display(fmt = "{:?} is not a group of 8 bits", group)]
    InvalidBitGroup { group: String },
    #[display(fmt = "invalid code table: {}", reason)]
    InvalidTable { reason: String },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
