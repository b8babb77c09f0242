use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Largest file accepted as claim evidence
pub(crate) const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

static IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("heic", "image/heic"),
    ("webp", "image/webp"),
];

static DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
];

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum AttachmentKind {
    Image,
    Document,
}

/// Evidence attached to a claim
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Attachment {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) kind: AttachmentKind,
    pub(crate) mime_type: &'static str,
    pub(crate) size: u64,
}

impl Attachment {
    pub(crate) fn summary(&self) -> String {
        let kind = match self.kind {
            AttachmentKind::Image => "image",
            AttachmentKind::Document => "document",
        };
        format!("{} ({kind}, {})", self.name, human_size(self.size))
    }
}

pub(crate) fn load_attachment(path: &Path) -> Result<Attachment, AttachError> {
    let metadata = fs::metadata(path).map_err(|source| AttachError::Io {
        path: path.to_owned(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(AttachError::NotAFile(path.to_owned()));
    }
    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        return Err(AttachError::TooLarge { size });
    }
    let (kind, mime_type) = classify(path);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!(path = %path.display(), size, mime_type, "attachment loaded");
    Ok(Attachment {
        path: path.to_owned(),
        name,
        kind,
        mime_type,
        size,
    })
}

fn classify(path: &Path) -> (AttachmentKind, &'static str) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if let Some(&(_, mime)) = IMAGE_TYPES.iter().find(|&&(e, _)| e == ext) {
        (AttachmentKind::Image, mime)
    } else {
        let mime = DOCUMENT_TYPES
            .iter()
            .find(|&&(e, _)| e == ext)
            .map_or(FALLBACK_MIME_TYPE, |&(_, mime)| mime);
        (AttachmentKind::Document, mime)
    }
}

fn human_size(size: u64) -> String {
    if size < 1024 {
        format!("{size} B")
    } else if size < 1024 * 1024 {
        format!("{} KB", size.div_ceil(1024))
    } else {
        let tenths = size * 10 / (1024 * 1024);
        format!("{}.{} MB", tenths / 10, tenths % 10)
    }
}

#[derive(Debug, Error)]
pub(crate) enum AttachError {
    #[error("File size must be less than 5MB.")]
    TooLarge { size: u64 },
    #[error("{} is not a regular file.", .0.display())]
    NotAFile(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AttachError {
    /// Heading for the alert shown to the user
    pub(crate) fn title(&self) -> &'static str {
        match self {
            AttachError::TooLarge { .. } => "File Too Large",
            AttachError::NotAFile(_) | AttachError::Io { .. } => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_of_size(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        let mut fp = fs::File::create(&path).unwrap();
        fp.write_all(&vec![0u8; size]).unwrap();
        path
    }

    #[test]
    fn test_load_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_of_size(dir.path(), "Receipt.JPG", 2048);
        let att = load_attachment(&path).unwrap();
        assert_eq!(att.name, "Receipt.JPG");
        assert_eq!(att.kind, AttachmentKind::Image);
        assert_eq!(att.mime_type, "image/jpeg");
        assert_eq!(att.size, 2048);
        assert_eq!(att.summary(), "Receipt.JPG (image, 2 KB)");
    }

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_of_size(dir.path(), "certificate.pdf", 10);
        let att = load_attachment(&path).unwrap();
        assert_eq!(att.kind, AttachmentKind::Document);
        assert_eq!(att.mime_type, "application/pdf");
        let path = file_of_size(dir.path(), "notes", 10);
        let att = load_attachment(&path).unwrap();
        assert_eq!(att.kind, AttachmentKind::Document);
        assert_eq!(att.mime_type, "application/octet-stream");
        assert_eq!(att.summary(), "notes (document, 10 B)");
    }

    #[test]
    fn test_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let limit = usize::try_from(MAX_FILE_SIZE).unwrap();
        let path = file_of_size(dir.path(), "exact.png", limit);
        assert!(load_attachment(&path).is_ok());
        let path = file_of_size(dir.path(), "big.png", limit + 1);
        let err = load_attachment(&path).unwrap_err();
        assert!(matches!(err, AttachError::TooLarge { size } if size == MAX_FILE_SIZE + 1));
        assert_eq!(err.title(), "File Too Large");
        assert_eq!(err.to_string(), "File size must be less than 5MB.");
    }

    #[test]
    fn test_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_attachment(dir.path()).unwrap_err();
        assert!(matches!(err, AttachError::NotAFile(_)));
        let err = load_attachment(&dir.path().join("missing.pdf")).unwrap_err();
        assert!(matches!(err, AttachError::Io { .. }));
        assert_eq!(err.title(), "Error");
    }
}
