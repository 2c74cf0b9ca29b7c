use image::DynamicImage;

use crate::{EncodingMode, Error, GraphicField};

const LABEL_START: &[u8] = b"^XA,^FS\n^FO0,0\n";
const LABEL_END: &[u8] = b"^FS,^XZ\n";

/// Wrap a Graphic Field into a complete label placed at the origin.
pub fn wrap_label(field: &GraphicField) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();
    buf.extend_from_slice(LABEL_START);
    buf.append(&mut field.to_bytes());
    buf.extend_from_slice(LABEL_END);
    buf
}

/// Convert `image` into a printable ZPL label.
///
/// The image is used as is; run it through [`flatten_image`](crate::flatten_image)
/// first to resize it and drop transparency.
pub fn convert_to_zpl(image: &DynamicImage, mode: EncodingMode) -> Result<Vec<u8>, Error> {
    let field = GraphicField::from_image(image, mode)?;
    Ok(wrap_label(&field))
}
