//! Rebuild bookkeeping for the polar axes actor.
//!
//! Setters bump one of two versions: the geometry version for anything
//! that moves or re-labels the frame, the attribute version for styling
//! and visibility. The actor compares them against what it last built.

use super::viewport::ViewKey;
use polarkit_core::Bounds;

#[derive(Debug, Default, Clone)]
pub struct RebuildState {
    geometry_version: u64,
    attribute_version: u64,
    built_geometry: Option<u64>,
    applied_attributes: Option<u64>,
    built_bounds: Option<Bounds>,
    forced: bool,
    view: Option<ViewKey>,
}

impl RebuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_geometry(&mut self) {
        self.geometry_version = self.geometry_version.wrapping_add(1);
    }

    pub fn touch_attributes(&mut self) {
        self.attribute_version = self.attribute_version.wrapping_add(1);
    }

    pub fn geometry_version(&self) -> u64 {
        self.geometry_version
    }

    pub fn attribute_version(&self) -> u64 {
        self.attribute_version
    }

    /// Version of the last completed build, if any.
    pub fn built_version(&self) -> Option<u64> {
        self.built_geometry
    }

    pub fn set_forced(&mut self, forced: bool) {
        self.forced = forced;
    }

    pub fn is_forced(&self) -> bool {
        self.forced
    }

    pub fn needs_rebuild(&self, bounds: &Bounds, axes_empty: bool) -> bool {
        self.forced
            || axes_empty
            || self.built_geometry != Some(self.geometry_version)
            || self.built_bounds.as_ref() != Some(bounds)
    }

    pub fn mark_built(&mut self, bounds: Bounds) {
        self.built_geometry = Some(self.geometry_version);
        self.built_bounds = Some(bounds);
        self.forced = false;
    }

    pub fn needs_attributes(&self) -> bool {
        self.applied_attributes != Some(self.attribute_version)
    }

    pub fn mark_attributes_applied(&mut self) {
        self.applied_attributes = Some(self.attribute_version);
    }

    /// Record the current view, returning true when it differs from the last one.
    pub fn view_changed(&mut self, view: Option<ViewKey>) -> bool {
        let changed = self.view != view;
        self.view = view;
        changed
    }

    /// Forget the last view so the next frame re-runs auto-scaling.
    pub fn invalidate_view(&mut self) {
        self.view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_build_is_needed() {
        let state = RebuildState::new();
        assert!(state.needs_rebuild(&Bounds::default(), false));
        assert!(state.needs_attributes());
        assert_eq!(state.built_version(), None);
    }

    #[test]
    fn test_mark_built_clears_everything() {
        let mut state = RebuildState::new();
        state.touch_geometry();
        state.set_forced(true);
        state.mark_built(Bounds::default());

        assert!(!state.needs_rebuild(&Bounds::default(), false));
        assert!(!state.is_forced());
        assert_eq!(state.built_version(), Some(1));
    }

    #[test]
    fn test_rebuild_triggers() {
        let mut state = RebuildState::new();
        state.mark_built(Bounds::default());

        assert!(state.needs_rebuild(&Bounds::default(), true));

        let moved = Bounds::from_array([0.0, 2.0, 0.0, 2.0, 0.0, 0.0]);
        assert!(state.needs_rebuild(&moved, false));

        state.set_forced(true);
        assert!(state.needs_rebuild(&Bounds::default(), false));
        state.set_forced(false);

        state.touch_geometry();
        assert!(state.needs_rebuild(&Bounds::default(), false));
    }

    #[test]
    fn test_attributes_are_tracked_separately() {
        let mut state = RebuildState::new();
        state.mark_built(Bounds::default());
        state.mark_attributes_applied();

        state.touch_attributes();
        assert!(state.needs_attributes());
        assert!(!state.needs_rebuild(&Bounds::default(), false));
    }

    #[test]
    fn test_view_changed() {
        let mut state = RebuildState::new();
        assert!(!state.view_changed(None));
        state.invalidate_view();
        assert!(!state.view_changed(None));
    }
}
