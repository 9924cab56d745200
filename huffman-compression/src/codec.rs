use log::{debug, trace};

use crate::{
    bits::{pack, to_bit_groups, unpack_byte, BITS_PER_BYTE},
    error::{HuffmanError, Result},
    prefix_code_table::{CodeTable, ETB_CHAR},
};

const EMPTY_GROUP: &str = "00000000";

// codes in order, then the ETB code, then zero bits up to the byte boundary
pub fn compress(table: &CodeTable, message: &str) -> Result<Vec<u8>> {
    let mut bits = String::new();
    for ch in message.chars() {
        if ch == ETB_CHAR {
            return Err(HuffmanError::ReservedSymbol);
        }
        let code = table
            .code(ch)
            .ok_or(HuffmanError::UnknownSymbol { symbol: ch })?;
        bits.push_str(code);
    }
    bits.push_str(table.terminator_code());

    let mut groups = to_bit_groups(&bits);
    if groups.is_empty() {
        // only a table whose terminator code is empty gets here
        groups.push(EMPTY_GROUP.to_owned());
    }

    let bytes = pack(&groups)?;
    debug!(
        "compressed {} characters into {} bits ({} bytes)",
        message.chars().count(),
        bits.len(),
        bytes.len()
    );
    Ok(bytes)
}

pub fn decompress(table: &CodeTable, data: &[u8]) -> Result<String> {
    let terminator = table.terminator_code();
    let mut message = String::new();
    if terminator.is_empty() {
        trace!("terminator code is empty, nothing to decode");
        return Ok(message);
    }

    let mut candidate = String::new();
    let mut bits_read = 0;
    for byte in data {
        for bit in unpack_byte(*byte).chars() {
            bits_read += 1;
            candidate.push(bit);

            if candidate == terminator {
                debug!(
                    "decompressed {} characters from {} of {} bits",
                    message.chars().count(),
                    bits_read,
                    data.len() * BITS_PER_BYTE
                );
                return Ok(message);
            }

            if let Some(ch) = table.symbol(&candidate) {
                message.push(ch);
                candidate.clear();
            }
        }
    }

    Err(HuffmanError::MalformedStream { bits_read })
}
