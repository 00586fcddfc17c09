use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    foundation::error::{MontageError, MontageResult},
    library::model::{CollectionMember, EntityId, EntityKind, LibraryItem, PlaylistDef},
};

/// Parent chains longer than this are treated as cyclic.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// Read-only lookups the collage engine needs from the host's entity graph.
///
/// Implementations must be pure with respect to one library snapshot: the engine calls these
/// repeatedly (once for the cache key, again for the render) and expects identical answers.
pub trait EntityGraph: Send + Sync {
    /// Kind of `id`, or `None` for an unknown entity.
    fn kind(&self, id: EntityId) -> Option<EntityKind>;

    fn display_name(&self, id: EntityId) -> Option<&str>;

    /// Path of the entity's own primary image.
    fn primary_image(&self, id: EntityId) -> Option<&Path>;

    /// Immediate parent of `id`.
    fn parent(&self, id: EntityId) -> Option<EntityId>;

    /// Ordered members when `id` is a collection.
    fn members(&self, id: EntityId) -> Option<&[CollectionMember]>;

    /// Nearest strict ancestor of `id` with the given kind.
    fn ancestor_of_kind(&self, id: EntityId, kind: EntityKind) -> Option<EntityId> {
        let mut cur = self.parent(id)?;
        for _ in 0..MAX_ANCESTOR_DEPTH {
            if self.kind(cur) == Some(kind) {
                return Some(cur);
            }
            cur = self.parent(cur)?;
        }
        None
    }
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct LibraryManifest {
    #[serde(default)]
    items: Vec<LibraryItem>,
    #[serde(default)]
    playlists: Vec<PlaylistDef>,
}

/// In-memory [`EntityGraph`] built from a flat list of items and playlists.
#[derive(Clone, Debug, Default)]
pub struct LibrarySnapshot {
    items: HashMap<EntityId, LibraryItem>,
    members: HashMap<EntityId, Vec<CollectionMember>>,
}

impl LibrarySnapshot {
    /// Index `items` and `playlists`. Every playlist is also registered as an item of kind
    /// [`EntityKind::Playlist`].
    pub fn new(items: Vec<LibraryItem>, playlists: Vec<PlaylistDef>) -> MontageResult<Self> {
        let mut out = Self::default();
        for item in items {
            out.insert_item(item)?;
        }
        for pl in playlists {
            out.insert_item(LibraryItem {
                id: pl.id,
                name: pl.name,
                kind: EntityKind::Playlist,
                primary_image: None,
                parent: None,
            })?;
            out.members.insert(pl.id, pl.members);
        }
        Ok(out)
    }

    /// Load a JSON library manifest (`{"items": [...], "playlists": [...]}`).
    pub fn from_path(path: impl AsRef<Path>) -> MontageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MontageError::validation(format!("open library JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(r: impl Read) -> MontageResult<Self> {
        let manifest: LibraryManifest = serde_json::from_reader(r)
            .map_err(|e| MontageError::serde(format!("parse library JSON: {e}")))?;
        Self::new(manifest.items, manifest.playlists)
    }

    pub fn item(&self, id: EntityId) -> Option<&LibraryItem> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert_item(&mut self, item: LibraryItem) -> MontageResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(MontageError::validation(format!(
                "duplicate library entity id {}",
                item.id
            )));
        }
        self.items.insert(item.id, item);
        Ok(())
    }
}

impl EntityGraph for LibrarySnapshot {
    fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.items.get(&id).map(|i| i.kind)
    }

    fn display_name(&self, id: EntityId) -> Option<&str> {
        self.items.get(&id).map(|i| i.name.as_str())
    }

    fn primary_image(&self, id: EntityId) -> Option<&Path> {
        self.items.get(&id)?.primary_image.as_deref()
    }

    fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.items.get(&id)?.parent
    }

    fn members(&self, id: EntityId) -> Option<&[CollectionMember]> {
        self.members.get(&id).map(Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/library/graph.rs"]
mod tests;
