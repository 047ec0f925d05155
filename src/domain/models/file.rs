use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "xls", "xlsx", "csv", "rtf", "ods", "ppt", "odp", "md", "html",
    "htm", "epub", "pages", "fig", "psd", "ai", "indd", "xd", "sketch", "afdesign", "afphoto",
];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Document,
    Image,
    Video,
    Audio,
    Other,
}

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Document,
        FileType::Image,
        FileType::Video,
        FileType::Audio,
        FileType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Document => "document",
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<FileType> {
        let value = value.trim().to_lowercase();
        FileType::ALL
            .into_iter()
            .find(|file_type| file_type.as_str() == value)
    }

    pub fn from_extension(extension: &str) -> FileType {
        let extension = extension.to_lowercase();
        let extension = extension.as_str();
        if DOCUMENT_EXTENSIONS.contains(&extension) {
            FileType::Document
        } else if IMAGE_EXTENSIONS.contains(&extension) {
            FileType::Image
        } else if VIDEO_EXTENSIONS.contains(&extension) {
            FileType::Video
        } else if AUDIO_EXTENSIONS.contains(&extension) {
            FileType::Audio
        } else {
            FileType::Other
        }
    }

    /// Maps the type segment of a listing route (`/documents`, `/media`, ...)
    /// to the stored types it shows. Unknown segments show documents.
    pub fn for_route(segment: &str) -> Vec<FileType> {
        match segment {
            "images" => vec![FileType::Image],
            "media" => vec![FileType::Video, FileType::Audio],
            "others" => vec![FileType::Other],
            _ => vec![FileType::Document],
        }
    }
}

/// Splits a file name into its lower-cased extension and type.
/// Names without a dot (or ending in one) have no extension.
pub fn classify(file_name: &str) -> (String, FileType) {
    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => {
            let extension = extension.to_lowercase();
            let file_type = FileType::from_extension(&extension);
            (extension, file_type)
        }
        _ => (String::new(), FileType::Other),
    }
}

/// Builds the stored name for a rename: the display name plus the file's
/// original extension. A trailing copy of the extension in `name` is dropped.
pub fn renamed(name: &str, extension: &str) -> String {
    let name = name.trim();
    if extension.is_empty() {
        return name.to_string();
    }
    let suffix = format!(".{}", extension);
    let split = name.len().saturating_sub(suffix.len());
    let stem = if name.len() > suffix.len()
        && name.is_char_boundary(split)
        && name[split..].eq_ignore_ascii_case(&suffix)
    {
        &name[..split]
    } else {
        name
    };
    format!("{}{}", stem, suffix)
}

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// What the blob store reports back after storing a [`FileData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBlob {
    pub blob_id: String,
    pub size: u64,
    pub mime_type: String,
    pub filename: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDocument {
    pub id: Uuid,
    pub name: String,
    pub file_type: FileType,
    pub extension: String,
    pub size: u64,
    pub url: String,
    pub owner: Uuid,
    pub account_id: String,
    pub users: Vec<String>,
    pub bucket_file_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileDocument {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    pub fn is_shared_with(&self, email: &str) -> bool {
        self.users.iter().any(|shared| shared == email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileList {
    pub documents: Vec<FileDocument>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(classify("report.PDF"), ("pdf".to_string(), FileType::Document));
        assert_eq!(classify("holiday.jpeg"), ("jpeg".to_string(), FileType::Image));
        assert_eq!(classify("clip.mkv"), ("mkv".to_string(), FileType::Video));
        assert_eq!(classify("song.flac"), ("flac".to_string(), FileType::Audio));
        assert_eq!(classify("archive.tar.gz"), ("gz".to_string(), FileType::Other));
    }

    #[test]
    fn names_without_extension_are_other() {
        assert_eq!(classify("README"), (String::new(), FileType::Other));
        assert_eq!(classify(".env"), (String::new(), FileType::Other));
        assert_eq!(classify("trailing."), (String::new(), FileType::Other));
    }

    #[test]
    fn route_segments_map_to_types() {
        assert_eq!(FileType::for_route("media"), vec![FileType::Video, FileType::Audio]);
        assert_eq!(FileType::for_route("others"), vec![FileType::Other]);
        assert_eq!(FileType::for_route("unknown"), vec![FileType::Document]);
    }

    #[test]
    fn rename_keeps_extension() {
        assert_eq!(renamed("budget", "xlsx"), "budget.xlsx");
        assert_eq!(renamed("budget.XLSX", "xlsx"), "budget.xlsx");
        assert_eq!(renamed("notes", ""), "notes");
    }
}
