use std::{io, path::Path};

/// The label used for documents that have no file name.
pub const UNNAMED_DOCUMENT: &str = "(uploaded)";

/// A decoded document, ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// The document text.
    pub text: String,
    /// The label recorded in each requirement's source.
    pub label: String,
}

impl Upload {
    /// Decode raw document bytes.
    ///
    /// Decoding never fails: byte sequences that are not valid UTF-8 are
    /// dropped, as is a leading byte order mark. A missing or empty file name
    /// is labelled [`UNNAMED_DOCUMENT`].
    #[must_use]
    pub fn from_bytes(bytes: &[u8], filename: Option<&str>) -> Self {
        let label = filename
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_DOCUMENT)
            .to_string();

        Self {
            text: decode_permissive(bytes),
            label,
        }
    }

    /// Read and decode a file, labelling it with its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let filename = path.file_name().map(|name| name.to_string_lossy());
        Ok(Self::from_bytes(&bytes, filename.as_deref()))
    }
}

/// Decode UTF-8, dropping invalid byte sequences and a leading byte order
/// mark.
#[must_use]
pub fn decode_permissive(bytes: &[u8]) -> String {
    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();

    text.strip_prefix('\u{feff}')
        .map_or_else(|| text.clone(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8_is_unchanged() {
        assert_eq!(decode_permissive("naïve — ok".as_bytes()), "naïve — ok");
    }

    #[test]
    fn invalid_sequences_are_dropped() {
        let bytes = b"The system \xff\xfemust work.\xc3";
        assert_eq!(decode_permissive(bytes), "The system must work.");
    }

    #[test]
    fn byte_order_mark_is_dropped() {
        assert_eq!(decode_permissive(b"\xef\xbb\xbfShall."), "Shall.");
    }

    #[test]
    fn unnamed_uploads_get_a_placeholder_label() {
        assert_eq!(Upload::from_bytes(b"x", None).label, "(uploaded)");
        assert_eq!(Upload::from_bytes(b"x", Some("")).label, "(uploaded)");
        assert_eq!(Upload::from_bytes(b"x", Some("spec.txt")).label, "spec.txt");
    }

    #[test]
    fn read_labels_with_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("spec.txt");
        std::fs::write(&path, b"It must run.\xff").unwrap();

        let upload = Upload::read(&path).unwrap();

        assert_eq!(upload.label, "spec.txt");
        assert_eq!(upload.text, "It must run.");
    }

    #[test]
    fn read_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Upload::read(&tmp.path().join("missing.txt")).is_err());
    }
}
