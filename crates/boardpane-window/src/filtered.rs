//! List windows filtered by display name
//!
//! The list shows the entities of an external source (nets, components,
//! violations) whose display name contains the filter text. Selection indices
//! point into the filtered list, so they are only valid against the filter that
//! produced them.

use std::sync::Arc;

use boardpane_state::FilteredListState;
use parking_lot::RwLock;

use crate::error::ApplyError;
use crate::frame::WindowFrame;
use crate::plan::{Field, FieldPlan, FieldValue};
use crate::window::{PersistableWindow, SubWindow};

/// Name shown for an entity in a list window and matched by the filter.
pub trait DisplayName {
    fn display_name(&self) -> String;
}

impl DisplayName for String {
    fn display_name(&self) -> String {
        self.clone()
    }
}

impl DisplayName for &'static str {
    fn display_name(&self) -> String {
        (*self).to_string()
    }
}

/// Supplies the current entities a list window displays.
pub trait EntitySource: Send {
    type Entity: DisplayName + Clone + Send;

    fn entities(&self) -> Vec<Self::Entity>;
}

impl<E> EntitySource for Arc<RwLock<Vec<E>>>
where
    E: DisplayName + Clone + Send + Sync,
{
    type Entity = E;

    fn entities(&self) -> Vec<E> {
        self.read().clone()
    }
}

/// Keeps the indices that fit a list of `len` entries, in order and without
/// duplicates. The rest are reported back.
pub fn validate_selection(indices: &[u32], len: usize) -> (Vec<usize>, Vec<ApplyError>) {
    let mut valid: Vec<usize> = Vec::with_capacity(indices.len());
    let mut dropped = Vec::new();
    for &index in indices {
        let position = index as usize;
        if position >= len {
            dropped.push(ApplyError::IndexOutOfRange { index, len });
        } else if !valid.contains(&position) {
            valid.push(position);
        }
    }
    (valid, dropped)
}

pub struct FilteredListWindow<S: EntitySource> {
    kind: &'static str,
    frame: WindowFrame,
    source: S,
    filter_text: String,
    /// None until the list is first calculated.
    entries: Option<Vec<S::Entity>>,
    selected: Vec<usize>,
}

impl<S: EntitySource> FilteredListWindow<S> {
    pub fn new(kind: &'static str, title: impl Into<String>, source: S) -> Self {
        Self {
            kind,
            frame: WindowFrame::new(title),
            source,
            filter_text: String::new(),
            entries: None,
            selected: Vec::new(),
        }
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.recalculate();
    }

    fn matches(&self, entity: &S::Entity) -> bool {
        let filter = self.filter_text.trim();
        filter.is_empty() || entity.display_name().contains(filter)
    }

    /// Rebuilds the displayed list from the source and drops selected indices
    /// that no longer fit.
    pub fn recalculate(&mut self) {
        let entries: Vec<S::Entity> = self
            .source
            .entities()
            .into_iter()
            .filter(|entity| self.matches(entity))
            .collect();
        let len = entries.len();
        self.entries = Some(entries);

        let before = self.selected.len();
        self.selected.retain(|&index| index < len);
        if self.selected.len() != before {
            tracing::debug!(
                kind = self.kind,
                dropped = before - self.selected.len(),
                "Selection shrunk after recalculation"
            );
        }
    }

    pub fn is_calculated(&self) -> bool {
        self.entries.is_some()
    }

    pub fn entries(&self) -> &[S::Entity] {
        self.entries.as_deref().unwrap_or(&[])
    }

    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    pub fn selected_entities(&self) -> Vec<&S::Entity> {
        let entries = self.entries();
        self.selected
            .iter()
            .filter_map(|&index| entries.get(index))
            .collect()
    }

    /// Replaces the selection. Indices outside the current list are dropped and
    /// returned as errors for the caller to log.
    pub fn select(&mut self, indices: &[u32]) -> Vec<ApplyError> {
        let (valid, dropped) = validate_selection(indices, self.entries().len());
        self.selected = valid;
        dropped
    }

    pub fn invert_selection(&mut self) {
        let len = self.entries().len();
        self.selected = (0..len).filter(|index| !self.selected.contains(index)).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.recalculate();
        }
        self.frame.set_visible(visible);
    }

    /// Filter and selection as shown right now.
    pub fn snapshot_info(&self) -> FilteredListState {
        FilteredListState::new(
            self.frame.state(),
            self.filter_text.clone(),
            self.selected.iter().map(|&index| index as u32).collect(),
        )
    }

    /// Reapplies a filter and selection taken by `snapshot_info`. Window bounds
    /// and visibility are left alone.
    pub fn restore_snapshot_info(&mut self, info: &FilteredListState) {
        self.apply_filter(info.filter_text.clone());
        self.apply_selection(&info.selected_indices);
    }

    fn apply_filter(&mut self, text: String) {
        if text != self.filter_text || !self.is_calculated() {
            self.filter_text = text;
            self.recalculate();
        }
    }

    fn apply_selection(&mut self, indices: &[u32]) {
        for err in self.select(indices) {
            tracing::debug!(kind = self.kind, error = %err, "Dropped restored selection");
        }
    }
}

impl<S: EntitySource> SubWindow for FilteredListWindow<S> {
    fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WindowFrame {
        &mut self.frame
    }
}

impl<S: EntitySource> PersistableWindow for FilteredListWindow<S> {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn field_plan(&self) -> FieldPlan {
        FieldPlan::base().extend(&[Field::FilterText, Field::SelectedIndices])
    }

    fn capture(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::FilterText => Some(FieldValue::FilterText(self.filter_text.clone())),
            Field::SelectedIndices => Some(FieldValue::SelectedIndices(
                self.selected.iter().map(|&index| index as u32).collect(),
            )),
            _ => self.frame.capture(field),
        }
    }

    fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Visible(visible) => self.set_visible(visible),
            FieldValue::FilterText(text) => self.apply_filter(text),
            FieldValue::SelectedIndices(indices) => self.apply_selection(&indices),
            other => self.frame.apply(other),
        }
    }

    fn refresh(&mut self) {
        if self.is_calculated() {
            self.recalculate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardpane_state::{FieldReader, FieldWriter, Rect, WindowState};

    fn nets(names: &[&str]) -> Arc<RwLock<Vec<String>>> {
        Arc::new(RwLock::new(names.iter().map(|n| n.to_string()).collect()))
    }

    #[test]
    fn test_filter_by_display_name() {
        let source = nets(&["GND", "net1", "net10", "VCC"]);
        let mut window = FilteredListWindow::new("nets", "Nets", source);

        window.set_filter("net1");
        assert_eq!(window.entries(), &["net1".to_string(), "net10".to_string()]);

        window.set_filter("  ");
        assert_eq!(window.entries().len(), 4);
    }

    #[test]
    fn test_validate_selection() {
        let (valid, dropped) = validate_selection(&[2, 0, 2, 5], 3);
        assert_eq!(valid, vec![2, 0]);
        assert_eq!(dropped, vec![ApplyError::IndexOutOfRange { index: 5, len: 3 }]);
    }

    #[test]
    fn test_invert_selection() {
        let mut window = FilteredListWindow::new("nets", "Nets", nets(&["a", "b", "c"]));
        window.recalculate();
        window.select(&[1]);
        window.invert_selection();
        assert_eq!(window.selected_indices(), &[0, 2]);
    }

    #[test]
    fn test_restore_drops_indices_beyond_shrunk_list() {
        let source = nets(&["R1", "R2", "R10", "C1"]);

        // Restore a selection of [0, 2] after the board lost R10.
        let saved = boardpane_state::FilteredListState::new(
            WindowState::new(Rect::new(0, 0, 100, 100), true),
            "R1",
            vec![0, 2],
        )
        .encode()
        .unwrap();
        source.write().retain(|name| name != "R10");

        let mut restored = FilteredListWindow::new("components", "Components", source);
        assert!(restored.read(&mut FieldReader::new(&saved)));
        assert_eq!(restored.filter_text(), "R1");
        assert_eq!(restored.entries(), &["R1".to_string()]);
        assert_eq!(restored.selected_indices(), &[0]);
    }

    #[test]
    fn test_save_writes_base_then_filter_fields() {
        let mut window = FilteredListWindow::new("nets", "Nets", nets(&["net1", "net2"]));
        window.frame_mut().set_bounds(Rect::new(1, 1, 80, 40));
        window.set_visible(true);
        window.set_filter("net");
        window.select(&[1]);

        let mut out = FieldWriter::new();
        window.save(&mut out).unwrap();
        assert_eq!(
            out.into_bytes(),
            window.snapshot_info().encode().unwrap()
        );
    }

    #[test]
    fn test_refresh_picks_up_source_changes() {
        let source = nets(&["net1"]);
        let mut window = FilteredListWindow::new("nets", "Nets", source.clone());
        window.set_visible(true);
        assert_eq!(window.entries().len(), 1);

        source.write().push("net2".to_string());
        window.refresh();
        assert_eq!(window.entries().len(), 2);
    }

    #[test]
    fn test_snapshot_info_round_trip() {
        let source = nets(&["net1", "net2", "gnd"]);
        let mut window = FilteredListWindow::new("nets", "Nets", source.clone());
        window.set_filter("net");
        window.select(&[1]);
        let info = window.snapshot_info();

        let mut other = FilteredListWindow::new("nets", "Nets", source);
        other.restore_snapshot_info(&info);
        assert_eq!(other.filter_text(), "net");
        assert_eq!(other.selected_entities(), vec![&"net2".to_string()]);
    }
}
