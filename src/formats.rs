#[cfg(feature = "png")]
pub(crate) mod png;

/// Image formats a text chunk codec can be registered for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Exr,
}

const FORMATS: &[(&[u8], ImageFormat)] = &[
    (b"\x89PNG\x0D\x0A\x1A\x0A", ImageFormat::Png),
    (b"\xFF\xD8\xFF", ImageFormat::Jpeg),
    (b"BM", ImageFormat::Bmp),
    (b"\x76\x2F\x31\x01", ImageFormat::Exr),
];

/// Identifies the format of a file from the signature at the start of its bytes.
pub fn identify_format(bytes: &[u8]) -> Option<ImageFormat> {
    FORMATS.iter().find(|(signature, _)| bytes.starts_with(signature)).map(|(_, format)| *format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correctly_identify_formats() {
        for format in FORMATS {
            assert_eq!(identify_format(format.0), Some(format.1));
        }
    }

    #[test]
    fn unknown_format() {
        let bytes = &[0x2E, 0x7C, 0x2E, 0x2E, 0x0A, 0x2E, 0x2E, 0x7C, 0x2E, 0x2C];
        assert_eq!(identify_format(bytes), None);
    }

    #[test]
    fn short_file() {
        assert_eq!(identify_format(&[0x89, 0x50]), None);
        assert_eq!(identify_format(&[]), None);
    }
}
