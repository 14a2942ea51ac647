//! Address segmentation for partial-highlight display.
//!
//! The last 60 characters of an address carry the key and checksum; the
//! header highlights the first and last 7 of those and dims the rest.

const HIGHLIGHT_LEN: usize = 7;
const MIDDLE_LEN: usize = 46;

/// An address split into four display segments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSegments {
    pub prefix: String,
    pub first_unique: String,
    pub middle: String,
    pub last_unique: String,
}

impl AddressSegments {
    pub fn concat(&self) -> String {
        [
            self.prefix.as_str(),
            self.first_unique.as_str(),
            self.middle.as_str(),
            self.last_unique.as_str(),
        ]
        .concat()
    }
}

/// Split `address` into prefix / 7 / 46 / 7 characters.
///
/// Short input is clamped from the end: the suffix fills first, then the
/// middle, then the leading highlight, and the prefix takes whatever is
/// left. Segments never overlap.
pub fn format_address(address: &str) -> AddressSegments {
    let chars: Vec<char> = address.chars().collect();
    let len = chars.len();

    let last_len = HIGHLIGHT_LEN.min(len);
    let middle_len = MIDDLE_LEN.min(len - last_len);
    let first_len = HIGHLIGHT_LEN.min(len - last_len - middle_len);
    let prefix_len = len - last_len - middle_len - first_len;

    let first_start = prefix_len;
    let middle_start = first_start + first_len;
    let last_start = middle_start + middle_len;

    AddressSegments {
        prefix: chars[..first_start].iter().collect(),
        first_unique: chars[first_start..middle_start].iter().collect(),
        middle: chars[middle_start..last_start].iter().collect(),
        last_unique: chars[last_start..].iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "nano_1natrium1o3z5519ifou7xii8crpxpk8y65qmkih8e8bpsjri651oza8imdd";

    #[test]
    fn test_full_length_split() {
        assert_eq!(ADDR.len(), 65);
        let seg = format_address(ADDR);
        assert_eq!(seg.prefix, "nano_");
        assert_eq!(seg.first_unique, "1natriu");
        assert_eq!(seg.middle.len(), 46);
        assert_eq!(seg.last_unique, &ADDR[58..]);
        assert_eq!(seg.concat(), ADDR);
    }

    #[test]
    fn test_legacy_xrb_prefix() {
        let addr = ADDR.replacen("nano_", "xrb_", 1);
        let seg = format_address(&addr);
        assert_eq!(seg.prefix, "xrb_");
        assert_eq!(seg.first_unique, "1natriu");
        assert_eq!(seg.concat(), addr);
    }

    #[test]
    fn test_short_address_clamps_from_the_end() {
        let seg = format_address("abcdefghij");
        assert_eq!(seg.last_unique, "defghij");
        assert_eq!(seg.middle, "abc");
        assert_eq!(seg.first_unique, "");
        assert_eq!(seg.prefix, "");
        assert_eq!(seg.concat(), "abcdefghij");

        let seg = format_address(&"x".repeat(55));
        assert_eq!(seg.prefix, "");
        assert_eq!(seg.first_unique.len(), 2);
        assert_eq!(seg.middle.len(), 46);
        assert_eq!(seg.last_unique.len(), 7);
    }

    #[test]
    fn test_empty_and_multibyte_input() {
        assert_eq!(format_address(""), AddressSegments::default());

        let odd = "ñ".repeat(62);
        let seg = format_address(&odd);
        assert_eq!(seg.prefix.chars().count(), 2);
        assert_eq!(seg.concat(), odd);
    }
}
