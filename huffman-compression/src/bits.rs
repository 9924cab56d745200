use itertools::Itertools;

use crate::error::{HuffmanError, Result};

pub const BITS_PER_BYTE: usize = 8;

/// Packs each 8 character bit group into one byte, most significant bit first.
pub fn pack<S: AsRef<str>>(groups: &[S]) -> Result<Vec<u8>> {
    groups
        .iter()
        .map(|group| {
            let group = group.as_ref();
            let is_binary = group.chars().all(|bit| bit == '0' || bit == '1');
            if group.len() != BITS_PER_BYTE || !is_binary {
                return Err(HuffmanError::InvalidBitGroup {
                    group: group.to_owned(),
                });
            }
            u8::from_str_radix(group, 2).map_err(|_| HuffmanError::InvalidBitGroup {
                group: group.to_owned(),
            })
        })
        .collect()
}

pub fn unpack_byte(byte: u8) -> String {
    format!("{byte:08b}")
}

/// Splits a bit string into 8 bit groups, right padding the last one with '0'.
///
/// A bit string whose length is already a multiple of 8 gets no extra group.
pub fn to_bit_groups(bits: &str) -> Vec<String> {
    bits.chars()
        .chunks(BITS_PER_BYTE)
        .into_iter()
        .map(|chunk| {
            let mut group: String = chunk.collect();
            while group.len() < BITS_PER_BYTE {
                group.push('0');
            }
            group
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{pack, to_bit_groups, unpack_byte};
    use crate::error::HuffmanError;

    #[rstest]
    #[case(0b1010_0011, "10100011")]
    #[case(0, "00000000")]
    #[case(u8::MAX, "11111111")]
    #[case(1, "00000001")]
    fn test_unpack_byte(#[case] byte: u8, #[case] expected: &str) {
        assert_eq!(unpack_byte(byte), expected);
        assert_eq!(pack(&[expected]).unwrap(), vec![byte]);
    }

    #[test]
    fn test_pack_keeps_group_order() {
        let bytes = pack(&["10100011", "11100000"]).unwrap();
        assert_eq!(bytes, vec![0xA3, 0xE0]);
    }

    #[rstest]
    #[case("1010")]
    #[case("101000111")]
    #[case("1010001x")]
    fn test_pack_rejects_bad_groups(#[case] group: &str) {
        let err = pack(&[group]).unwrap_err();
        assert_eq!(
            err,
            HuffmanError::InvalidBitGroup {
                group: group.to_owned()
            }
        );
    }

    #[rstest]
    #[case("", vec![])]
    #[case("1", vec!["10000000"])]
    #[case("1010001111100", vec!["10100011", "11100000"])]
    #[case("11110000", vec!["11110000"])]
    #[case("1111000011", vec!["11110000", "11000000"])]
    fn test_to_bit_groups(#[case] bits: &str, #[case] expected: Vec<&str>) {
        assert_eq!(to_bit_groups(bits), expected);
    }
}
