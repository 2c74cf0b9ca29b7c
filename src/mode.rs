use std::str::FromStr;

/// Data format of a Graphic Field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// Plain hexadecimal rows (0-9A-F), one row per line.
    Ascii,
    /// The packed bytes as they are.
    Binary,
    /// Hexadecimal rows compressed with the ZPL run-length alphabet.
    CompressedAscii,
}

impl EncodingMode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Ascii),
            1 => Some(Self::Binary),
            2 => Some(Self::CompressedAscii),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Ascii => 0,
            Self::Binary => 1,
            Self::CompressedAscii => 2,
        }
    }

    /// Compression type letter written after `^GF`.
    pub fn type_tag(&self) -> char {
        match self {
            Self::Ascii | Self::CompressedAscii => 'A',
            Self::Binary => 'B',
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl Default for EncodingMode {
    fn default() -> Self {
        Self::CompressedAscii
    }
}

impl FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" | "a" | "0" => Ok(Self::Ascii),
            "binary" | "b" | "1" => Ok(Self::Binary),
            "compressed" | "compressed-ascii" | "z" | "2" => Ok(Self::CompressedAscii),
            _ => Err(format!("unknown encoding mode '{}'", s)),
        }
    }
}
