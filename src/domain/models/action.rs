use serde::Deserialize;

/// Mutations a file owner can apply to an existing file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileAction {
    Rename { name: String },
    Share { emails: Vec<String> },
    Unshare { email: String },
    Delete,
}

impl FileAction {
    pub fn name(&self) -> &'static str {
        match self {
            FileAction::Rename { .. } => "rename",
            FileAction::Share { .. } => "share",
            FileAction::Unshare { .. } => "unshare",
            FileAction::Delete => "delete",
        }
    }
}
