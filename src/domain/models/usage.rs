use chrono::{DateTime, Utc};
use serde::Serialize;

use super::file::{FileDocument, FileType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TypeUsage {
    pub size: u64,
    #[serde(rename = "latestDate")]
    pub latest_date: Option<DateTime<Utc>>,
}

impl TypeUsage {
    fn record(&mut self, size: u64, updated_at: DateTime<Utc>) {
        self.size += size;
        if self.latest_date.map_or(true, |latest| updated_at > latest) {
            self.latest_date = Some(updated_at);
        }
    }

    fn merge(self, other: TypeUsage) -> TypeUsage {
        TypeUsage {
            size: self.size + other.size,
            latest_date: self.latest_date.max(other.latest_date),
        }
    }
}

/// Storage consumed by one owner, broken down by file type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalSpace {
    pub document: TypeUsage,
    pub image: TypeUsage,
    pub video: TypeUsage,
    pub audio: TypeUsage,
    pub other: TypeUsage,
    pub used: u64,
    pub all: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub title: &'static str,
    pub size: u64,
    #[serde(rename = "latestDate")]
    pub latest_date: Option<DateTime<Utc>>,
    pub route: &'static str,
}

impl TotalSpace {
    pub fn new(all: u64) -> Self {
        Self {
            document: TypeUsage::default(),
            image: TypeUsage::default(),
            video: TypeUsage::default(),
            audio: TypeUsage::default(),
            other: TypeUsage::default(),
            used: 0,
            all,
        }
    }

    pub fn from_files<'a>(all: u64, files: impl IntoIterator<Item = &'a FileDocument>) -> Self {
        let mut total = TotalSpace::new(all);
        for file in files {
            total.record(file);
        }
        total
    }

    pub fn record(&mut self, file: &FileDocument) {
        let usage = match file.file_type {
            FileType::Document => &mut self.document,
            FileType::Image => &mut self.image,
            FileType::Video => &mut self.video,
            FileType::Audio => &mut self.audio,
            FileType::Other => &mut self.other,
        };
        usage.record(file.size, file.updated_at);
        self.used += file.size;
    }

    pub fn percentage_used(&self) -> f64 {
        if self.all == 0 {
            return 0.0;
        }
        ((self.used as f64 / self.all as f64) * 10000.0).round() / 100.0
    }

    pub fn summary(&self) -> Vec<UsageSummary> {
        let media = self.video.merge(self.audio);
        vec![
            UsageSummary {
                title: "Documents",
                size: self.document.size,
                latest_date: self.document.latest_date,
                route: "/documents",
            },
            UsageSummary {
                title: "Images",
                size: self.image.size,
                latest_date: self.image.latest_date,
                route: "/images",
            },
            UsageSummary {
                title: "Media",
                size: media.size,
                latest_date: media.latest_date,
                route: "/media",
            },
            UsageSummary {
                title: "Others",
                size: self.other.size,
                latest_date: self.other.latest_date,
                route: "/others",
            },
        ]
    }
}

/// Human readable size, e.g. `1.5 MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{} Bytes", bytes)
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else if bytes_f < KB * KB * KB {
        format!("{:.1} MB", bytes_f / (KB * KB))
    } else {
        format!("{:.1} GB", bytes_f / (KB * KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn file(file_type: FileType, size: u64, updated_at: DateTime<Utc>) -> FileDocument {
        FileDocument {
            id: Uuid::new_v4(),
            name: "f".to_string(),
            file_type,
            extension: String::new(),
            size,
            url: String::new(),
            owner: Uuid::new_v4(),
            account_id: String::new(),
            users: vec![],
            bucket_file_id: String::new(),
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn aggregates_per_type_and_total() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let files = vec![
            file(FileType::Document, 100, t0),
            file(FileType::Document, 50, t0 + Duration::hours(2)),
            file(FileType::Video, 1000, t0 + Duration::hours(1)),
            file(FileType::Audio, 10, t0 + Duration::hours(3)),
        ];

        let total = TotalSpace::from_files(2000, &files);

        assert_eq!(total.document.size, 150);
        assert_eq!(total.document.latest_date, Some(t0 + Duration::hours(2)));
        assert_eq!(total.used, 1160);
        assert_eq!(total.percentage_used(), 58.0);

        let media = &total.summary()[2];
        assert_eq!(media.title, "Media");
        assert_eq!(media.size, 1010);
        assert_eq!(media.latest_date, Some(t0 + Duration::hours(3)));
        assert_eq!(total.summary()[3].latest_date, None);
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2.0 GB");
    }
}
