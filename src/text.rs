//! Cartridge text encodings.
//!
//! Each generation stores names with its own single-byte character set and a
//! terminator byte. A few bytes expand to two-letter tokens (`PK`, `MN`).

use crate::error::{Error, Result};
use crate::reader::ByteReader;

/// A 256-entry byte to glyph mapping plus the byte that ends a string.
pub struct TextTable {
    pub terminator: u8,
    glyph: fn(u8) -> Option<&'static str>,
}

/// Gen 1 and Gen 2 international character set.
pub static GEN12_INTERNATIONAL: TextTable = TextTable {
    terminator: 0x50,
    glyph: gen12_glyph,
};

/// Gen 3 character set used by English and European releases.
pub static GEN3_WESTERN: TextTable = TextTable {
    terminator: 0xff,
    glyph: gen3_western_glyph,
};

/// Gen 3 character set of the Japanese releases.
pub static GEN3_JAPANESE: TextTable = TextTable {
    terminator: 0xff,
    glyph: gen3_japanese_glyph,
};

const UPPERCASE: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

const LOWERCASE: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const HIRAGANA: [&str; 80] = [
    "あ", "い", "う", "え", "お", "か", "き", "く", "け", "こ", "さ", "し", "す", "せ", "そ", "た",
    "ち", "つ", "て", "と", "な", "に", "ぬ", "ね", "の", "は", "ひ", "ふ", "へ", "ほ", "ま", "み",
    "む", "め", "も", "や", "ゆ", "よ", "ら", "り", "る", "れ", "ろ", "わ", "を", "ん", "ぁ", "ぃ",
    "ぅ", "ぇ", "ぉ", "ゃ", "ゅ", "ょ", "が", "ぎ", "ぐ", "げ", "ご", "ざ", "じ", "ず", "ぜ", "ぞ",
    "だ", "ぢ", "づ", "で", "ど", "ば", "び", "ぶ", "べ", "ぼ", "ぱ", "ぴ", "ぷ", "ぺ", "ぽ", "っ",
];

const KATAKANA: [&str; 80] = [
    "ア", "イ", "ウ", "エ", "オ", "カ", "キ", "ク", "ケ", "コ", "サ", "シ", "ス", "セ", "ソ", "タ",
    "チ", "ツ", "テ", "ト", "ナ", "ニ", "ヌ", "ネ", "ノ", "ハ", "ヒ", "フ", "ヘ", "ホ", "マ", "ミ",
    "ム", "メ", "モ", "ヤ", "ユ", "ヨ", "ラ", "リ", "ル", "レ", "ロ", "ワ", "ヲ", "ン", "ァ", "ィ",
    "ゥ", "ェ", "ォ", "ャ", "ュ", "ョ", "ガ", "ギ", "グ", "ゲ", "ゴ", "ザ", "ジ", "ズ", "ゼ", "ゾ",
    "ダ", "ヂ", "ヅ", "デ", "ド", "バ", "ビ", "ブ", "ベ", "ボ", "パ", "ピ", "プ", "ペ", "ポ", "ッ",
];

impl TextTable {
    pub fn glyph(&self, byte: u8) -> Option<&'static str> {
        (self.glyph)(byte)
    }

    /// Decodes at most `max_glyphs` bytes, stopping early at the terminator.
    /// Offsets in errors are relative to the start of `bytes`.
    pub fn decode(&self, bytes: &[u8], max_glyphs: usize) -> Result<String> {
        self.decode_from(bytes, 0, max_glyphs)
    }

    /// Decodes a fixed-width text field of a save image. Offsets in errors are
    /// absolute.
    pub fn decode_at(&self, reader: &ByteReader, offset: usize, max_glyphs: usize) -> Result<String> {
        self.decode_from(reader.region(offset, max_glyphs)?, offset, max_glyphs)
    }

    fn decode_from(&self, bytes: &[u8], base: usize, max_glyphs: usize) -> Result<String> {
        let mut out_text = String::new();
        for (idx, byte) in bytes.iter().take(max_glyphs).enumerate() {
            if *byte == self.terminator {
                break;
            }
            let glyph = self.glyph(*byte).ok_or(Error::UnmappedGlyph {
                byte: *byte,
                offset: base + idx,
            })?;
            out_text.push_str(glyph);
        }

        Ok(out_text)
    }
}

fn gen12_glyph(byte: u8) -> Option<&'static str> {
    let glyph = match byte {
        0x7f => " ",
        0x80..=0x99 => UPPERCASE[(byte - 0x80) as usize],
        0x9a => "(",
        0x9b => ")",
        0x9c => ":",
        0x9d => ";",
        0x9e => "[",
        0x9f => "]",
        0xa0..=0xb9 => LOWERCASE[(byte - 0xa0) as usize],
        0xba => "é",
        0xe1 => "PK",
        0xe2 => "MN",
        0xe0 => "'",
        0xe3 => "-",
        0xe4 => "'r",
        0xe5 => "'m",
        0xe6 => "?",
        0xe7 => "!",
        0xe8 => ".",
        0xef => "♂",
        0xf0 => "¥",
        0xf1 => "*",
        0xf2 => ".",
        0xf3 => "/",
        0xf4 => ",",
        0xf5 => "♀",
        0xf6..=0xff => DIGITS[(byte - 0xf6) as usize],
        _ => return None,
    };
    Some(glyph)
}

const LATIN_UPPER_ACCENTED: [Option<&str>; 15] = [
    Some("À"), Some("Á"), Some("Â"), Some("Ç"), Some("È"), Some("É"), Some("Ê"), Some("Ë"),
    Some("Ì"), None, Some("Î"), Some("Ï"), Some("Ò"), Some("Ó"), Some("Ô"),
];

const LATIN_MIXED_ACCENTED: [Option<&str>; 28] = [
    Some("Œ"), Some("Ù"), Some("Ú"), Some("Û"), Some("Ñ"), Some("ß"), Some("à"), Some("á"),
    None, Some("ç"), Some("è"), Some("é"), Some("ê"), Some("ë"), Some("ì"), None,
    Some("î"), Some("ï"), Some("ò"), Some("ó"), Some("ô"), Some("œ"), Some("ù"), Some("ú"),
    Some("û"), Some("ñ"), Some("º"), Some("ª"),
];

fn gen3_western_glyph(byte: u8) -> Option<&'static str> {
    let glyph = match byte {
        0x00 => " ",
        0x01..=0x0f => LATIN_UPPER_ACCENTED[(byte - 0x01) as usize]?,
        0x10..=0x2b => LATIN_MIXED_ACCENTED[(byte - 0x10) as usize]?,
        0x2d => "&",
        0x2e => "+",
        0x35 => "=",
        0x36 => ";",
        0x51 => "¿",
        0x52 => "¡",
        0x5a => "Í",
        0x5b => "%",
        0x5c => "(",
        0x5d => ")",
        0x68 => "â",
        0x6f => "í",
        0x85 => "<",
        0x86 => ">",
        0xa1..=0xaa => DIGITS[(byte - 0xa1) as usize],
        0xab => "!",
        0xac => "?",
        0xad => ".",
        0xae => "-",
        0xb0 => "…",
        0xb1 => "“",
        0xb2 => "”",
        0xb3 => "‘",
        0xb4 => "’",
        0xb5 => "♂",
        0xb6 => "♀",
        0xb8 => ",",
        0xba => "/",
        0xbb..=0xd4 => UPPERCASE[(byte - 0xbb) as usize],
        0xd5..=0xee => LOWERCASE[(byte - 0xd5) as usize],
        0xf0 => ":",
        0xf1 => "Ä",
        0xf2 => "Ö",
        0xf3 => "Ü",
        0xf4 => "ä",
        0xf5 => "ö",
        0xf6 => "ü",
        _ => return None,
    };
    Some(glyph)
}

fn gen3_japanese_glyph(byte: u8) -> Option<&'static str> {
    match byte {
        0x01..=0x50 => Some(HIRAGANA[(byte - 0x01) as usize]),
        0x51..=0xa0 => Some(KATAKANA[(byte - 0x51) as usize]),
        _ => gen3_western_glyph(byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_only_is_empty() {
        assert_eq!(GEN12_INTERNATIONAL.decode(&[0x50], 10).unwrap(), "");
        assert_eq!(GEN3_WESTERN.decode(&[0xff; 7], 7).unwrap(), "");
    }

    #[test]
    fn stops_at_first_terminator() {
        // "GOLD" then a terminator, then more valid glyphs
        let bytes = [0x86, 0x8e, 0x8b, 0x83, 0x50, 0x80, 0x81, 0x50];
        assert_eq!(GEN12_INTERNATIONAL.decode(&bytes, 10).unwrap(), "GOLD");
    }

    #[test]
    fn stops_after_max_glyphs() {
        let bytes = [0x80, 0x81, 0x82, 0x83];
        assert_eq!(GEN12_INTERNATIONAL.decode(&bytes, 2).unwrap(), "AB");
    }

    #[test]
    fn token_bytes_expand_to_two_characters() {
        let decoded = GEN12_INTERNATIONAL.decode(&[0xe1, 0x50], 10).unwrap();
        assert_eq!(decoded, "PK");
        assert_eq!(decoded.chars().count(), 2);

        let decoded = GEN12_INTERNATIONAL.decode(&[0xe2, 0xe1, 0x50], 10).unwrap();
        assert_eq!(decoded, "MNPK");
    }

    #[test]
    fn unmapped_bytes_are_errors() {
        let bytes = [0x80, 0x01, 0x50];
        assert_eq!(
            GEN12_INTERNATIONAL.decode(&bytes, 10),
            Err(Error::UnmappedGlyph {
                byte: 0x01,
                offset: 1
            })
        );
    }

    #[test]
    fn decode_at_reports_absolute_offsets() {
        let mut data = vec![0x50u8; 32];
        data[20] = 0x00;
        let reader = ByteReader::new(&data);
        assert_eq!(
            GEN12_INTERNATIONAL.decode_at(&reader, 20, 10),
            Err(Error::UnmappedGlyph {
                byte: 0x00,
                offset: 20
            })
        );
        assert!(matches!(
            GEN12_INTERNATIONAL.decode_at(&reader, 30, 10),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn gen1_and_gen2_symbols() {
        let bytes = [0xf6, 0xff, 0x7f, 0xef, 0xf5, 0xe7, 0x50];
        assert_eq!(GEN12_INTERNATIONAL.decode(&bytes, 10).unwrap(), "09 ♂♀!");
    }

    #[test]
    fn gen1_and_gen2_punctuation() {
        // FARFETCH'D fills the nickname field without a terminator.
        let bytes = [0x85, 0x80, 0x91, 0x85, 0x84, 0x93, 0x82, 0x87, 0xe0, 0x83];
        assert_eq!(GEN12_INTERNATIONAL.decode(&bytes, 10).unwrap(), "FARFETCH'D");

        let bytes = [0xf0, 0xf7, 0xf2, 0xe4, 0xe5, 0x50];
        assert_eq!(GEN12_INTERNATIONAL.decode(&bytes, 10).unwrap(), "¥1.'r'm");
    }

    #[test]
    fn gen3_names() {
        // "MAY"
        let bytes = [0xc7, 0xbb, 0xd3, 0xff, 0x00, 0x00, 0x00];
        assert_eq!(GEN3_WESTERN.decode(&bytes, 7).unwrap(), "MAY");
        // "Wurmple" with a digit afterwards
        let bytes = [0xd1, 0xe9, 0xe6, 0xe1, 0xe4, 0xe0, 0xd9, 0xa2, 0xff];
        assert_eq!(GEN3_WESTERN.decode(&bytes, 10).unwrap(), "Wurmple1");
    }

    #[test]
    fn gen3_european_letters() {
        // "Évoli"
        let bytes = [0x06, 0xea, 0xe3, 0xe0, 0xdd, 0xff];
        assert_eq!(GEN3_WESTERN.decode(&bytes, 10).unwrap(), "Évoli");
        // "Müller"
        let bytes = [0xc7, 0xf6, 0xe0, 0xe0, 0xd9, 0xe6, 0xff];
        assert_eq!(GEN3_WESTERN.decode(&bytes, 10).unwrap(), "Müller");
        // "Ñoño"
        let bytes = [0x14, 0xe3, 0x29, 0xe3, 0xff];
        assert_eq!(GEN3_WESTERN.decode(&bytes, 10).unwrap(), "Ñoño");
        assert_eq!(
            GEN3_WESTERN.decode(&[0x0a, 0xff], 10),
            Err(Error::UnmappedGlyph {
                byte: 0x0a,
                offset: 0
            })
        );
    }

    #[test]
    fn gen3_japanese_kana() {
        // タマゴ
        let bytes = [0x60, 0x6f, 0x8b, 0xff];
        assert_eq!(GEN3_JAPANESE.decode(&bytes, 10).unwrap(), "タマゴ");
        assert!(GEN3_WESTERN.decode(&bytes, 10).is_err());

        // The accented western bytes read as hiragana here.
        let bytes = [0x25, 0x03, 0x07, 0xff];
        assert_eq!(GEN3_JAPANESE.decode(&bytes, 10).unwrap(), "ゆうき");
    }
}
