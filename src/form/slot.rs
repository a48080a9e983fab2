use crate::assets::{AssetKind, ImageAsset};

/// Receipt for an in-flight upload. Only the most recent ticket for a slot
/// can fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket {
    kind: AssetKind,
    id: u64,
}

impl UploadTicket {
    pub(crate) fn new(kind: AssetKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// State of a logo or signature slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssetSlot {
    /// Nothing uploaded, or the last upload could not be decoded.
    #[default]
    Empty,
    /// Waiting for the upload with this ticket; show a placeholder.
    Pending(UploadTicket),
    Ready(ImageAsset),
}

impl AssetSlot {
    pub fn asset(&self) -> Option<&ImageAsset> {
        match self {
            Self::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn is_pending(&self, ticket: UploadTicket) -> bool {
        matches!(self, Self::Pending(t) if *t == ticket)
    }
}
