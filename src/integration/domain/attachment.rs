//! Remote attachment snapshots and their local representation.

use super::IssueSnapshot;
use serde::{Deserialize, Serialize};

/// Attachment as reported by the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSnapshot {
    /// Tracker-internal attachment identifier.
    pub remote_id: String,
    /// File name.
    pub filename: String,
    /// Download URL of the attachment content.
    pub content_url: String,
    /// Thumbnail URL, present for previewable files.
    pub thumbnail_url: Option<String>,
    /// MIME type reported by the tracker.
    pub mime_type: Option<String>,
}

/// Kind of local attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// Image rendered inline.
    Image,
    /// Any other file, opened as a link.
    File,
}

impl AttachmentKind {
    /// Returns the icon name used for this kind.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::File => "insert_drive_file",
        }
    }
}

/// Attachment in the local task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAttachment {
    /// Identifier of the originating remote attachment.
    pub remote_id: String,
    /// Display title.
    pub title: String,
    /// Path opened for the attachment: thumbnail when present, content otherwise.
    pub path: String,
    /// Full-size content URL for images.
    pub original_image_path: Option<String>,
    /// Attachment kind.
    pub kind: AttachmentKind,
    /// Icon name.
    pub icon: String,
}

impl From<&AttachmentSnapshot> for LocalAttachment {
    fn from(snapshot: &AttachmentSnapshot) -> Self {
        let is_image = snapshot
            .mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"));
        let kind = if is_image {
            AttachmentKind::Image
        } else {
            AttachmentKind::File
        };
        Self {
            remote_id: snapshot.remote_id.clone(),
            title: snapshot.filename.clone(),
            path: snapshot
                .thumbnail_url
                .clone()
                .unwrap_or_else(|| snapshot.content_url.clone()),
            original_image_path: is_image.then(|| snapshot.content_url.clone()),
            kind,
            icon: kind.icon().to_owned(),
        }
    }
}

/// Maps every remote attachment of a snapshot, preserving count and order.
///
/// A missing snapshot or attachment list yields an empty vector.
#[must_use]
pub fn map_attachments(snapshot: Option<&IssueSnapshot>) -> Vec<LocalAttachment> {
    snapshot
        .map(|issue| issue.attachments().iter().map(LocalAttachment::from).collect())
        .unwrap_or_default()
}
