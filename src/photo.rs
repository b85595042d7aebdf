//! Photo upload pipeline: a picker dialog, an async read, a format sniff,
//! and a base64 payload for the metadata provider. A dismissed dialog is a
//! no-op; a bad file leaves the slot at its previous value and surfaces the
//! error to the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use iced::widget::image::Handle;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::slots::PhotoSlot;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("could not read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("file is not a recognizable image")]
    UnrecognizedImage,
}

/// Ask the user for an image and load it into slot `index`.
///
/// Returns `None` when the dialog is dismissed. The type filter is
/// advisory; whatever comes back is sniffed, not trusted by extension.
pub async fn pick_and_load(index: usize) -> Option<Result<PhotoSlot, PhotoError>> {
    let picked = rfd::AsyncFileDialog::new()
        .set_title("Choose a photo for this month")
        .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
        .pick_file()
        .await?;

    Some(load_slot(index, picked.path().to_path_buf()).await)
}

async fn load_slot(index: usize, path: PathBuf) -> Result<PhotoSlot, PhotoError> {
    let bytes = tokio::fs::read(&path).await?;
    let slot = decode_upload(index, bytes)?;
    println!("📷 Loaded month {} from {}", index + 1, path.display());
    Ok(slot)
}

/// Turn raw upload bytes into a slot: sniff the format, derive the mime
/// type for the metadata provider, and keep both a display handle and the
/// base64 payload.
fn decode_upload(index: usize, bytes: Vec<u8>) -> Result<PhotoSlot, PhotoError> {
    let format = image::guess_format(&bytes).map_err(|_| PhotoError::UnrecognizedImage)?;
    let mime = format.to_mime_type();
    let encoded = STANDARD.encode(&bytes);

    Ok(PhotoSlot::new(index, Handle::from_bytes(bytes), encoded, mime))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_decode_upload_sniffs_png() {
        let slot = decode_upload(4, PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(slot.mime, "image/png");
        assert_eq!(slot.month, 5);
        assert_eq!(slot.base64, STANDARD.encode(PNG_MAGIC));
    }

    #[test]
    fn test_decode_upload_sniffs_jpeg() {
        let jpeg = vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        let slot = decode_upload(0, jpeg).unwrap();
        assert_eq!(slot.mime, "image/jpeg");
    }

    #[test]
    fn test_decode_upload_rejects_garbage() {
        let result = decode_upload(0, vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(PhotoError::UnrecognizedImage)));
    }
}
