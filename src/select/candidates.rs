use std::{collections::HashSet, path::PathBuf};

use crate::library::{
    graph::EntityGraph,
    model::{CollectionMember, EntityId, EntityKind, MemberRole},
};

/// One source image chosen to represent a collection member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Entity whose artwork is used (may be an ancestor of the member).
    pub source: EntityId,
    pub image_path: PathBuf,
    /// Display name of `source`; only used for final ordering.
    pub name: String,
}

/// Resolve one candidate per member through the artwork cascade, then de-duplicate by source
/// entity keeping the first occurrence.
#[tracing::instrument(skip(members, graph), fields(member_count = members.len()))]
pub fn select_candidates<G: EntityGraph + ?Sized>(
    members: &[CollectionMember],
    graph: &G,
) -> Vec<ImageCandidate> {
    let mut seen = HashSet::<EntityId>::with_capacity(members.len());
    let mut out = Vec::with_capacity(members.len());
    for member in members {
        let Some(source) = resolve_source(member, graph) else {
            tracing::debug!(entity = %member.entity, "member has no usable artwork");
            continue;
        };
        if !seen.insert(source) {
            continue;
        }
        // resolve_source only yields entities with a primary image
        let Some(path) = graph.primary_image(source) else {
            continue;
        };
        out.push(ImageCandidate {
            source,
            image_path: path.to_path_buf(),
            name: graph.display_name(source).unwrap_or_default().to_string(),
        });
    }
    out
}

fn resolve_source<G: EntityGraph + ?Sized>(
    member: &CollectionMember,
    graph: &G,
) -> Option<EntityId> {
    let id = member.entity;

    if is_episode(member, graph)
        && let Some(series) = graph.ancestor_of_kind(id, EntityKind::Series)
        && graph.primary_image(series).is_some()
    {
        return Some(series);
    }

    if graph.primary_image(id).is_some() {
        return Some(id);
    }

    // Only album parents: folder art next to loose files is not representative.
    let parent = graph.parent(id)?;
    if graph.kind(parent) == Some(EntityKind::MusicAlbum)
        && graph.primary_image(parent).is_some()
    {
        return Some(parent);
    }

    None
}

fn is_episode<G: EntityGraph + ?Sized>(member: &CollectionMember, graph: &G) -> bool {
    match member.role {
        Some(role) => role == MemberRole::Episode,
        None => graph.kind(member.entity) == Some(EntityKind::Episode),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/candidates.rs"]
mod tests;
