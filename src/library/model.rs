use std::path::PathBuf;

use uuid::Uuid;

/// Identity of a library entity.
///
/// Displays in the 32-digit lowercase hex form used by cache keys.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl std::str::FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Library entity kinds the engine distinguishes between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Playlist,
    Series,
    Season,
    Episode,
    MusicArtist,
    MusicAlbum,
    Audio,
    Movie,
    Video,
    Folder,
    Other,
}

impl EntityKind {
    /// Collection kinds the playlist collage applies to.
    pub fn is_collection(self) -> bool {
        matches!(self, Self::Playlist)
    }
}

/// Hint attached to a playlist entry describing what the entry is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// A TV episode; its series artwork takes priority over its own.
    Episode,
    /// A track that belongs to an album.
    AlbumTrack,
}

/// One entry of a collection, in collection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CollectionMember {
    pub entity: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

impl CollectionMember {
    pub fn new(entity: EntityId) -> Self {
        Self { entity, role: None }
    }

    pub fn with_role(entity: EntityId, role: MemberRole) -> Self {
        Self {
            entity,
            role: Some(role),
        }
    }
}

/// A single library entity as stored in a [`crate::LibrarySnapshot`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LibraryItem {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    /// Path to the entity's own primary artwork, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityId>,
}

/// An ordered collection definition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaylistDef {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<CollectionMember>,
}
