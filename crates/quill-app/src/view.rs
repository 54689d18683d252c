//! Render-ready snapshot of the composer.
//!
//! Hosts sample a [`ComposerView`] every frame instead of reading driver
//! state, so they never need to know about animation targets or the slot.

use quill_core::{DriverId, PanelId};
use quill_proto::Command;

/// One panel as it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// Which panel.
    pub id: PanelId,
    /// Downward translation from the bottom edge.
    pub offset: f32,
    /// Whether the panel is shown or animating in.
    pub visible: bool,
}

/// One action-bar entry as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// Command behind the entry.
    pub command: Command,
    /// Icon name.
    pub icon: String,
    /// Highlighted because the cursor context matches.
    pub active: bool,
}

/// Composer frame sampled at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerView {
    /// Vertical translation of surface and action bar.
    pub composer_offset: f32,
    /// Both panels.
    pub panels: Vec<PanelView>,
    /// Action bar drawn opaque. Transparent otherwise.
    pub toolbar_visible: bool,
    /// Action bar entries in display order.
    pub entries: Vec<EntryView>,
    /// Current slot holder.
    pub active_driver: Option<DriverId>,
}

impl ComposerView {
    /// Action bar opacity.
    pub fn toolbar_opacity(&self) -> f32 {
        if self.toolbar_visible { 1.0 } else { 0.0 }
    }

    /// Panel by identity.
    pub fn panel(&self, id: PanelId) -> Option<&PanelView> {
        self.panels.iter().find(|panel| panel.id == id)
    }

    /// Commands of highlighted entries.
    pub fn highlighted(&self) -> Vec<Command> {
        self.entries.iter().filter(|entry| entry.active).map(|entry| entry.command).collect()
    }
}
