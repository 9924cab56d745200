use std::collections::HashMap;

use crate::{codec, error::Result, prefix_code_table::CodeTable};

/// Huffman encoder/decoder trained once on a corpus and reused for any number of messages.
///
/// The code table never changes after construction, so a shared reference can be used
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct ReusableHuffman {
    table: CodeTable,
}

impl ReusableHuffman {
    pub fn new(corpus: &str) -> Self {
        Self::from_code_table(CodeTable::build(corpus))
    }

    pub fn from_code_table(table: CodeTable) -> Self {
        Self { table }
    }

    /// Copy of the code table, keyed by character.
    pub fn get_code_table(&self) -> HashMap<char, String> {
        self.table.to_map()
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    pub fn compress(&self, message: &str) -> Result<Vec<u8>> {
        codec::compress(&self.table, message)
    }

    pub fn decompress(&self, data: &[u8]) -> Result<String> {
        codec::decompress(&self.table, data)
    }
}
