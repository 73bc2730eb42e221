//! Code page 437, the VGA text-mode character set.
//!
//! Only the accented Latin letters used by the keyboard layouts and the
//! console texts are covered; ASCII maps to itself.

/// Shown for characters the font cannot represent.
pub const PLACEHOLDER: u8 = 0xFE;

const HIGH: [(char, u8); 34] = [
    ('Ç', 0x80),
    ('ü', 0x81),
    ('é', 0x82),
    ('â', 0x83),
    ('ä', 0x84),
    ('à', 0x85),
    ('å', 0x86),
    ('ç', 0x87),
    ('ê', 0x88),
    ('ë', 0x89),
    ('è', 0x8A),
    ('ï', 0x8B),
    ('î', 0x8C),
    ('ì', 0x8D),
    ('Ä', 0x8E),
    ('Å', 0x8F),
    ('É', 0x90),
    ('ô', 0x93),
    ('ö', 0x94),
    ('ò', 0x95),
    ('û', 0x96),
    ('ù', 0x97),
    ('Ö', 0x99),
    ('Ü', 0x9A),
    ('á', 0xA0),
    ('í', 0xA1),
    ('ó', 0xA2),
    ('ú', 0xA3),
    ('ñ', 0xA4),
    ('Ñ', 0xA5),
    ('º', 0xA7),
    ('¡', 0xAD),
    ('ß', 0xE1),
    ('²', 0xFD),
];

/// Encodes a character for the text-mode font.
pub fn encode(c: char) -> u8 {
    if c.is_ascii() {
        return c as u8;
    }
    HIGH.iter()
        .find(|&&(ch, _)| ch == c)
        .map_or(PLACEHOLDER, |&(_, byte)| byte)
}

/// Decodes a font byte, if it is ASCII or one of the known letters.
pub fn decode(byte: u8) -> Option<char> {
    if byte.is_ascii() {
        return Some(byte as char);
    }
    HIGH.iter()
        .find(|&&(_, b)| b == byte)
        .map(|&(ch, _)| ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umlauts_use_font_positions() {
        assert_eq!(encode('ä'), 0x84);
        assert_eq!(encode('ß'), 0xE1);
        assert_eq!(encode('A'), b'A');
        assert_eq!(decode(0xA4), Some('ñ'));
    }

    #[test]
    fn unknown_characters_fall_back_to_placeholder() {
        assert_eq!(encode('€'), PLACEHOLDER);
        assert_eq!(decode(0xB0), None);
    }
}
