use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag for a file, derived from its extension.
///
/// The scanner stamps every snapshot with a kind so rules can match on broad
/// categories without enumerating extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Code,
    Other,
}

/// Extensions classified as source code before consulting MIME tables
/// (mime_guess reports most of these as plain text).
const CODE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "jsx", "ts", "tsx", "c", "h", "cpp", "hpp", "cs", "go", "rb", "java", "kt",
    "swift", "m", "mm", "sh", "bash", "zsh", "php", "lua", "sql", "html", "css", "scss", "toml",
    "yaml", "yml",
];

/// Extensions classified as archives, including disk images mime_guess has no
/// mapping for.
const ARCHIVE_EXTENSIONS: &[&str] = &[
    "zip", "tar", "gz", "bz2", "xz", "zst", "7z", "rar", "dmg", "iso", "pkg",
];

impl FileKind {
    /// Classify an extension (with or without a leading dot) into a kind.
    ///
    /// Code and archive tables are consulted first, then the MIME type guess,
    /// so `rs` lands in `Code` rather than the `text/*` bucket.
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        if ext.is_empty() {
            return FileKind::Other;
        }
        if CODE_EXTENSIONS.contains(&ext.as_str()) {
            return FileKind::Code;
        }
        if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
            return FileKind::Archive;
        }

        match mime_guess::from_ext(&ext).first() {
            Some(mime) => match mime.type_().as_str() {
                "image" => FileKind::Image,
                "video" => FileKind::Video,
                "audio" => FileKind::Audio,
                "text" => FileKind::Document,
                "application" => {
                    let subtype = mime.subtype().as_str();
                    if subtype == "pdf"
                        || subtype == "rtf"
                        || subtype == "msword"
                        || subtype.contains("document")
                        || subtype.contains("spreadsheet")
                        || subtype.contains("presentation")
                    {
                        FileKind::Document
                    } else if subtype.contains("zip") || subtype.contains("compressed") {
                        FileKind::Archive
                    } else {
                        FileKind::Other
                    }
                }
                _ => FileKind::Other,
            },
            None => FileKind::Other,
        }
    }
}

/// Immutable snapshot of one file's attributes.
///
/// Produced by the scanner once per pass; the engine never re-reads the file
/// system mid-evaluation. A missing timestamp makes date conditions evaluate
/// to false rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    /// Full file name, including extension
    pub name: String,
    /// File extension (without dot), None when the file has none
    pub extension: Option<String>,
    /// File size in bytes
    pub size: u64,
    /// Created timestamp
    pub created_at: Option<DateTime<Utc>>,
    /// Last modified timestamp
    pub modified_at: Option<DateTime<Utc>>,
    /// Last accessed timestamp
    pub accessed_at: Option<DateTime<Utc>>,
    /// Category tag, derived from the extension at scan time
    pub kind: FileKind,
    /// Tag identifying where the file was found (e.g. "downloads", "desktop")
    pub source_location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_video_audio_classification() {
        assert_eq!(FileKind::from_extension("jpg"), FileKind::Image);
        assert_eq!(FileKind::from_extension("png"), FileKind::Image);
        assert_eq!(FileKind::from_extension("mp4"), FileKind::Video);
        assert_eq!(FileKind::from_extension("mp3"), FileKind::Audio);
    }

    #[test]
    fn test_document_classification() {
        assert_eq!(FileKind::from_extension("pdf"), FileKind::Document);
        assert_eq!(FileKind::from_extension("txt"), FileKind::Document);
    }

    #[test]
    fn test_archive_classification() {
        assert_eq!(FileKind::from_extension("zip"), FileKind::Archive);
        assert_eq!(FileKind::from_extension("dmg"), FileKind::Archive);
        assert_eq!(FileKind::from_extension("tar"), FileKind::Archive);
    }

    #[test]
    fn test_code_classification() {
        assert_eq!(FileKind::from_extension("rs"), FileKind::Code);
        assert_eq!(FileKind::from_extension("py"), FileKind::Code);
    }

    #[test]
    fn test_leading_dot_and_case() {
        assert_eq!(FileKind::from_extension(".PDF"), FileKind::Document);
        assert_eq!(FileKind::from_extension("JPG"), FileKind::Image);
    }

    #[test]
    fn test_unknown_extension_is_other() {
        assert_eq!(FileKind::from_extension("xyzzy"), FileKind::Other);
        assert_eq!(FileKind::from_extension(""), FileKind::Other);
    }
}
