//! Image upload helpers

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Detected image format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageKind {
    pub extension: &'static str,
    pub mime_type: &'static str,
}

/// Sniff the image format from the file's leading bytes
pub fn detect_image(data: &[u8]) -> Option<ImageKind> {
    let kind = infer::get(data)?;
    if kind.matcher_type() != infer::MatcherType::Image {
        return None;
    }

    Some(ImageKind {
        extension: kind.extension(),
        mime_type: kind.mime_type(),
    })
}

/// Blob name for an uploaded image:
/// `<hackathon>/<9 chars of a fresh uuid><YYYYmmddHHMMSS>.<ext>`
pub fn image_blob_name(hackathon_name: &str, extension: &str, now: DateTime<Utc>) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}{}.{}",
        hackathon_name,
        &id[..9],
        now.format("%Y%m%d%H%M%S"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_detects_png_and_jpeg() {
        let png = detect_image(PNG_HEADER).unwrap();
        assert_eq!(png.extension, "png");
        assert_eq!(png.mime_type, "image/png");

        let jpeg = detect_image(JPEG_HEADER).unwrap();
        assert_eq!(jpeg.extension, "jpg");
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(detect_image(b"%PDF-1.7 not an image").is_none());
        assert!(detect_image(b"plain text").is_none());
        assert!(detect_image(&[]).is_none());
    }

    #[test]
    fn test_blob_name_layout() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let name = image_blob_name("spring-hack", "png", now);

        let (prefix, file) = name.split_once('/').unwrap();
        assert_eq!(prefix, "spring-hack");
        assert!(file.ends_with("20240309140507.png"));
        assert_eq!(file.len(), 9 + 14 + ".png".len());
    }

    #[test]
    fn test_blob_names_are_unique() {
        let now = Utc::now();
        assert_ne!(image_blob_name("h", "gif", now), image_blob_name("h", "gif", now));
    }
}
