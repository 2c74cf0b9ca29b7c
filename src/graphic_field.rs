use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::{
    compress::{compress_row, REPEAT_ROW},
    error::Error,
    mode::EncodingMode,
    raster::{hex_row, pack_image},
    Matrix,
};

/// A `^GF` Graphic Field: header values plus the encoded row data.
///
/// The row data is kept as bytes since a [`EncodingMode::Binary`] field
/// carries the packed rows unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicField {
    mode: EncodingMode,
    bytes_per_row: usize,
    rows: usize,
    data: Vec<u8>,
}

impl GraphicField {
    /// Pack and encode an image that has been prepared for thresholding.
    pub fn from_image(image: &DynamicImage, mode: EncodingMode) -> Result<Self, Error> {
        Self::from_rgba(&image.to_rgba8(), mode)
    }

    pub fn from_rgba(image: &RgbaImage, mode: EncodingMode) -> Result<Self, Error> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::InvalidInput(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        Self::from_matrix(&pack_image(image), mode)
    }

    /// Encode already packed rows.
    ///
    /// All rows must be non-empty and of the same width.
    pub fn from_matrix(matrix: &Matrix, mode: EncodingMode) -> Result<Self, Error> {
        let bytes_per_row = match matrix.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(Error::InvalidInput("no pixel rows".to_string())),
        };

        if let Some(i) = matrix.iter().position(|row| row.len() != bytes_per_row) {
            return Err(Error::InvalidInput(format!(
                "row {} has {} bytes, expected {}",
                i,
                matrix[i].len(),
                bytes_per_row
            )));
        }

        let mut encoder = RowEncoder::new(mode);
        let mut data: Vec<u8> = Vec::new();
        for row in matrix {
            encoder.encode(row, &mut data);
        }

        debug!(
            "graphic field {:?}: {} rows of {} bytes, {} bytes of data",
            mode,
            matrix.len(),
            bytes_per_row,
            data.len()
        );

        Ok(GraphicField {
            mode,
            bytes_per_row,
            rows: matrix.len(),
            data,
        })
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size of the uncompressed bitmap in bytes.
    pub fn total_bytes(&self) -> usize {
        self.rows * self.bytes_per_row
    }

    /// Encoded row data, without the header.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `^GF<type>,<data length>,<total bytes>,<bytes per row>,` and a newline.
    pub fn header(&self) -> String {
        format!(
            "^GF{},{},{},{},\n",
            self.mode.type_tag(),
            self.data.len(),
            self.total_bytes(),
            self.bytes_per_row
        )
    }

    /// Header followed by the row data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.header().into_bytes();
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Same as [`to_bytes`](Self::to_bytes) for the ASCII modes.
    ///
    /// # Errors
    ///
    /// [`Error::NotText`] for a binary field.
    pub fn to_text(&self) -> Result<String, Error> {
        if !self.mode.is_text() {
            return Err(Error::NotText(self.mode));
        }
        let mut text = self.header();
        // ASCII modes only ever write hex digits and RLE letters
        text.push_str(&String::from_utf8_lossy(&self.data));
        Ok(text)
    }
}

/// How rows are rendered into the field data, chosen once per field.
#[derive(Debug)]
enum RowEncoder {
    Ascii,
    Binary,
    /// Keeps the previous compressed row to emit `:` for repeats.
    Compressed { previous: Option<String> },
}

impl RowEncoder {
    fn new(mode: EncodingMode) -> Self {
        match mode {
            EncodingMode::Ascii => Self::Ascii,
            EncodingMode::Binary => Self::Binary,
            EncodingMode::CompressedAscii => Self::Compressed { previous: None },
        }
    }

    fn encode(&mut self, row: &[u8], buf: &mut Vec<u8>) {
        match self {
            Self::Ascii => {
                buf.extend_from_slice(hex_row(row).as_bytes());
                buf.push(b'\n');
            }
            Self::Binary => buf.extend_from_slice(row),
            Self::Compressed { previous } => {
                let current = compress_row(&hex_row(row));
                if previous.as_deref() == Some(current.as_str()) {
                    buf.push(REPEAT_ROW as u8);
                } else {
                    buf.extend_from_slice(current.as_bytes());
                }
                *previous = Some(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_rows(mode: EncodingMode, rows: &[&[u8]]) -> Vec<u8> {
        let mut encoder = RowEncoder::new(mode);
        let mut buf = Vec::new();
        for row in rows {
            encoder.encode(row, &mut buf);
        }
        buf
    }

    #[test]
    fn ascii_rows_end_with_newline() {
        let buf = encode_rows(EncodingMode::Ascii, &[&[0x00, 0xA5], &[0xFF, 0x01]]);
        assert_eq!(buf, b"00A5\nFF01\n".to_vec());
    }

    #[test]
    fn binary_rows_are_raw() {
        let buf = encode_rows(EncodingMode::Binary, &[&[0x00, 0x0A], &[0xFF, 0x3A]]);
        assert_eq!(buf, vec![0x00, 0x0A, 0xFF, 0x3A]);
    }

    #[test]
    fn compressed_repeats_only_identical_neighbours() {
        let rows: &[&[u8]] = &[
            &[0x00, 0x00],
            &[0x00, 0x00],
            &[0x00, 0x00],
            &[0xFF, 0xFF],
            &[0x00, 0x00],
            &[0x12, 0x34],
            &[0x12, 0x34],
        ];
        let buf = encode_rows(EncodingMode::CompressedAscii, rows);
        assert_eq!(String::from_utf8(buf).unwrap(), ",::!,1234:");
    }

    #[test]
    fn header_counts_data_bytes() {
        let matrix: Matrix = vec![vec![0x00; 3], vec![0xF0; 3]];
        let field = GraphicField::from_matrix(&matrix, EncodingMode::CompressedAscii).unwrap();
        assert_eq!(field.data(), b",F0F0F0");
        assert_eq!(field.header(), "^GFA,7,6,3,\n");
        assert_eq!(field.to_text().unwrap(), "^GFA,7,6,3,\n,F0F0F0");
    }

    #[test]
    fn binary_header_and_text() {
        let matrix: Matrix = vec![vec![0x0A], vec![0x3A]];
        let field = GraphicField::from_matrix(&matrix, EncodingMode::Binary).unwrap();
        assert_eq!(field.header(), "^GFB,2,2,1,\n");
        assert_eq!(field.to_bytes(), b"^GFB,2,2,1,\n\x0A\x3A".to_vec());
        assert!(matches!(
            field.to_text(),
            Err(Error::NotText(EncodingMode::Binary))
        ));
    }

    #[test]
    fn rejects_ragged_or_empty_matrix() {
        let ragged: Matrix = vec![vec![0x00; 2], vec![0x00; 3]];
        assert!(matches!(
            GraphicField::from_matrix(&ragged, EncodingMode::Ascii),
            Err(Error::InvalidInput(_))
        ));
        assert!(GraphicField::from_matrix(&Matrix::new(), EncodingMode::Ascii).is_err());
        assert!(GraphicField::from_matrix(&vec![vec![]], EncodingMode::Ascii).is_err());
    }

    #[test]
    fn rejects_empty_image() {
        let image = RgbaImage::new(0, 4);
        assert!(matches!(
            GraphicField::from_rgba(&image, EncodingMode::Ascii),
            Err(Error::InvalidInput(_))
        ));
    }
}
