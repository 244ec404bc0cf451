use std::collections::hash_set;

use tilemark_shared::{ChunkKey, Position, SurfaceId};

use crate::{session::Session, SessionKey, Viewer, ViewerKey};

pub struct SessionRef<'s> {
    session: &'s Session,
    key: SessionKey,
}

impl<'s> SessionRef<'s> {
    pub(crate) fn new(session: &'s Session, key: &SessionKey) -> Self {
        Self { session, key: *key }
    }

    pub fn key(&self) -> SessionKey {
        self.key
    }

    pub fn viewer(&self, viewer_key: &ViewerKey) -> Option<&Viewer> {
        self.session.viewer(viewer_key)
    }

    pub fn viewer_count(&self) -> usize {
        self.session.viewer_count()
    }

    /// Returns true if the chunk was part of the last sync sent to this
    /// session
    pub fn was_sent(&self, chunk: &ChunkKey) -> bool {
        self.session.previously_sent().contains(chunk)
    }

    pub fn sent_chunks(&self) -> hash_set::Iter<'_, ChunkKey> {
        self.session.previously_sent().iter()
    }
}

pub struct SessionMut<'s> {
    session: &'s mut Session,
    key: SessionKey,
    default_view_radius: f32,
}

impl<'s> SessionMut<'s> {
    pub(crate) fn new(session: &'s mut Session, key: &SessionKey, default_view_radius: f32) -> Self {
        Self {
            session,
            key: *key,
            default_view_radius,
        }
    }

    pub fn key(&self) -> SessionKey {
        self.key
    }

    /// Adds or replaces a viewer
    pub fn insert_viewer(&mut self, viewer_key: ViewerKey, viewer: Viewer) -> &mut Self {
        self.session.insert_viewer(viewer_key, viewer);

        self
    }

    /// Adds or replaces a viewer using the configured default view radius
    pub fn spawn_viewer(&mut self, viewer_key: ViewerKey, surface: SurfaceId, position: Position) -> &mut Self {
        let viewer = Viewer::new(surface, position, self.default_view_radius);
        self.session.insert_viewer(viewer_key, viewer);

        self
    }

    /// Returns false if the session has no such viewer
    pub fn move_viewer(&mut self, viewer_key: &ViewerKey, surface: SurfaceId, position: Position) -> bool {
        let Some(viewer) = self.session.viewer_mut(viewer_key) else {
            return false;
        };
        viewer.surface = surface;
        viewer.position = position;
        true
    }

    pub fn set_view_radius(&mut self, viewer_key: &ViewerKey, view_radius: f32) -> bool {
        let Some(viewer) = self.session.viewer_mut(viewer_key) else {
            return false;
        };
        viewer.view_radius = view_radius;
        true
    }

    pub fn remove_viewer(&mut self, viewer_key: &ViewerKey) -> Option<Viewer> {
        self.session.remove_viewer(viewer_key)
    }

    /// Removes all viewers from the session
    pub fn clear_viewers(&mut self) -> &mut Self {
        self.session.clear_viewers();

        self
    }

    /// Makes the next sync resend every chunk in view, e.g. after the
    /// client reports it lost its state
    pub fn resync(&mut self) -> &mut Self {
        self.session.reset_previously_sent();

        self
    }
}
