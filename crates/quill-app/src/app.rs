//! Composer screen state machine.
//!
//! This module defines the [`Composer`] state machine, the screen controller
//! that ties the coordination core to the editing surface, completely
//! decoupled from I/O.
//!
//! It consumes [`crate::AppEvent`] inputs and produces [`crate::AppAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Routes action-bar taps: font opens the emoji/font panel (or the
//!   keyboard when that panel is already open), image toggles the tool tray,
//!   everything else becomes a `DOCUMENT_COMMAND`.
//! - Re-syncs the surface on mount and on every global font change
//!   (`ENABLE_FONT` then `SET_CONTENT` with empty content).
//! - Mirrors the surface's toolbar flag and cursor context.
//! - Translates driver effects into host actions.

use std::{ops::Sub, time::Duration};

use quill_core::{Coordinator, DriverEffect, PanelId};
use quill_proto::{Command, Outbound, SelectionUpdate};

use crate::{
    ActionBar, AppAction, AppEvent, ComposerConfig, ComposerView, EntryView, FontCatalog,
    PanelView, Route, Selection,
};

/// Composer screen state machine.
///
/// Generic over the instant type so simulation can run it on virtual time.
#[derive(Debug, Clone)]
pub struct Composer<I> {
    /// Panel/keyboard exclusivity.
    coordinator: Coordinator<I>,
    /// Action bar entries.
    action_bar: ActionBar,
    /// Mirror of the surface's cursor context.
    selection: Selection,
    /// Surface asked for the action bar.
    toolbar_visible: bool,
    /// Catalog used to resolve the global font.
    fonts: FontCatalog,
    /// Globally selected font name. `None` until one is selected.
    font_name: Option<String>,
    /// Screen has mounted; font changes before this are synced on mount.
    mounted: bool,
}

impl<I> Composer<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an unmounted composer.
    pub fn new(config: &ComposerConfig, fonts: FontCatalog) -> Self {
        Self {
            coordinator: Coordinator::new(config.animation.into()),
            action_bar: ActionBar::default(),
            selection: Selection::default(),
            toolbar_visible: false,
            fonts,
            font_name: config.initial_font.clone(),
            mounted: false,
        }
    }

    /// Replace the action bar.
    #[must_use]
    pub fn with_action_bar(mut self, action_bar: ActionBar) -> Self {
        self.action_bar = action_bar;
        self
    }

    /// Mount the screen and sync the surface with the current font.
    pub fn mount(&mut self) -> Vec<AppAction> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        self.sync_font()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent, now: I) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![AppAction::Render],
            AppEvent::Tap(command) => self.tap(command, now),
            AppEvent::SurfaceMessage(_) => {
                // Raw envelopes must go through the Bridge first.
                tracing::warn!("undecoded surface message reached the composer");
                vec![]
            },
            AppEvent::ToolbarShown => {
                if self.toolbar_visible {
                    return vec![];
                }
                self.toolbar_visible = true;
                vec![AppAction::Render]
            },
            AppEvent::ToolbarHidden => {
                if !self.toolbar_visible {
                    return vec![];
                }
                self.toolbar_visible = false;
                vec![AppAction::Render]
            },
            AppEvent::ContentObserved(fields) => {
                tracing::debug!(fields = fields.len(), "content echo observed");
                vec![]
            },
            AppEvent::SelectionChanged(update) => self.apply_selection(update),
            AppEvent::KeyboardInsets(insets) => {
                let effects = self.coordinator.on_keyboard_insets(insets, now);
                Self::effect_actions(effects)
            },
            AppEvent::PanelLayout { panel, height } => {
                if self.coordinator.on_panel_layout(panel, height, now) {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::InputMounted(mounted) => {
                self.coordinator.set_input_mounted(mounted);
                vec![]
            },
            AppEvent::FontSelected(name) => self.select_font(name),
            AppEvent::Close => vec![AppAction::Quit],
        }
    }

    /// Route an action-bar tap.
    pub fn tap(&mut self, command: Command, now: I) -> Vec<AppAction> {
        match command {
            Command::ChangeFont => {
                if self.coordinator.panel(PanelId::Emoji).is_shown() {
                    let effects = self.coordinator.show_keyboard(now);
                    Self::effect_actions(effects)
                } else {
                    let effects = self.coordinator.show_panel(PanelId::Emoji, now);
                    let mut actions = Self::effect_actions(effects);
                    actions.push(AppAction::Navigate(Route::FontList));
                    actions
                }
            },
            Command::InsertImage => {
                let effects = self.coordinator.toggle_panel(PanelId::ToolTray, now);
                Self::effect_actions(effects)
            },
            _ => match self.action_bar.entry(command) {
                Some(entry) => vec![AppAction::Post(Outbound::DocumentCommand(entry.clone()))],
                None => {
                    tracing::warn!(%command, "tap on command missing from the action bar");
                    vec![]
                },
            },
        }
    }

    /// Change the global font. Re-syncs the surface if the name changed and
    /// the screen is mounted.
    pub fn select_font(&mut self, name: String) -> Vec<AppAction> {
        if self.font_name.as_deref() == Some(name.as_str()) {
            return vec![];
        }
        self.font_name = Some(name);
        if self.mounted { self.sync_font() } else { vec![] }
    }

    /// Snapshot for rendering at `now`.
    pub fn view(&self, now: I) -> ComposerView {
        let panels = PanelId::ALL
            .into_iter()
            .map(|id| {
                let panel = self.coordinator.panel(id);
                PanelView { id, offset: panel.offset_at(now), visible: panel.is_shown() }
            })
            .collect();

        let entries = self
            .action_bar
            .entries()
            .iter()
            .map(|entry| EntryView {
                command: entry.command,
                icon: entry.text_icon.clone(),
                active: self.selection.is_active(entry.command),
            })
            .collect();

        ComposerView {
            composer_offset: self.coordinator.composer_offset(now),
            panels,
            toolbar_visible: self.toolbar_visible,
            entries,
            active_driver: self.coordinator.active_driver(),
        }
    }

    /// Panel/keyboard coordinator.
    pub fn coordinator(&self) -> &Coordinator<I> {
        &self.coordinator
    }

    /// Action bar entries.
    pub fn action_bar(&self) -> &ActionBar {
        &self.action_bar
    }

    /// Mirror of the surface's cursor context.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether the surface asked for the action bar.
    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    /// Globally selected font name.
    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Font catalog.
    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    /// Whether the screen has mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn apply_selection(&mut self, update: SelectionUpdate) -> Vec<AppAction> {
        if !update.ignored.is_empty() {
            tracing::warn!(fields = ?update.ignored, "ignoring non-conforming selection fields");
        }
        let before = self.selection.clone();
        self.selection.merge(update);
        if self.selection == before { vec![] } else { vec![AppAction::Render] }
    }

    /// `ENABLE_FONT` for the resolved font (skipped if unresolvable), then a
    /// full content reset.
    fn sync_font(&mut self) -> Vec<AppAction> {
        let mut actions = Vec::with_capacity(3);
        match self.font_name.as_deref() {
            Some(name) => match self.fonts.find(name) {
                Some(font) => {
                    actions.push(AppAction::Post(Outbound::EnableFont { data: font.clone() }));
                },
                None => tracing::debug!(font = name, "font not in catalog, skipping enable"),
            },
            None => tracing::debug!("no global font selected"),
        }
        actions.push(AppAction::Post(Outbound::SetContent { content: String::new() }));
        actions.push(AppAction::Render);
        actions
    }

    fn effect_actions(effects: Vec<DriverEffect>) -> Vec<AppAction> {
        let mut actions: Vec<AppAction> = effects
            .into_iter()
            .map(|effect| match effect {
                DriverEffect::FocusInput => AppAction::FocusInput,
                DriverEffect::BlurInput => AppAction::BlurInput,
                DriverEffect::KeyboardShown => AppAction::Post(Outbound::ShowToolbar),
            })
            .collect();
        actions.push(AppAction::Render);
        actions
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{DriverId, KeyboardInsets};
    use quill_proto::FontDescriptor;

    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn mounted() -> Composer<Duration> {
        let fonts = FontCatalog::new(vec![
            FontDescriptor::new("LXGW").with_field("url", "fonts/lxgw.ttf"),
            FontDescriptor::new("Noto"),
        ]);
        let mut composer = Composer::new(&ComposerConfig::default(), fonts);
        let _ = composer.mount();
        let _ = composer.handle(AppEvent::InputMounted(true), ms(0));
        let _ = composer.handle(AppEvent::PanelLayout { panel: PanelId::Emoji, height: 300.0 }, ms(0));
        let _ =
            composer.handle(AppEvent::PanelLayout { panel: PanelId::ToolTray, height: 200.0 }, ms(0));
        composer
    }

    fn posts(actions: &[AppAction]) -> Vec<&Outbound> {
        actions
            .iter()
            .filter_map(|action| match action {
                AppAction::Post(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn mount_without_font_only_resets_content() {
        let mut composer: Composer<Duration> =
            Composer::new(&ComposerConfig::default(), FontCatalog::default());
        let actions = composer.mount();

        assert_eq!(posts(&actions), vec![&Outbound::SetContent { content: String::new() }]);
        assert!(composer.mount().is_empty());
    }

    #[test]
    fn font_change_enables_font_then_resets() {
        let mut composer = mounted();
        let actions = composer.select_font("LXGW".into());

        let posted = posts(&actions);
        assert_eq!(posted.len(), 2);
        assert!(matches!(posted[0], Outbound::EnableFont { data } if data.script_name == "LXGW"));
        assert_eq!(posted[1], &Outbound::SetContent { content: String::new() });
    }

    #[test]
    fn reselecting_same_font_sends_nothing() {
        let mut composer = mounted();
        let _ = composer.select_font("LXGW".into());
        assert!(composer.select_font("LXGW".into()).is_empty());
    }

    #[test]
    fn unknown_font_skips_enable_but_resets() {
        let mut composer = mounted();
        let actions = composer.select_font("Missing".into());
        assert_eq!(posts(&actions), vec![&Outbound::SetContent { content: String::new() }]);
    }

    #[test]
    fn font_selected_before_mount_syncs_on_mount() {
        let fonts = FontCatalog::new(vec![FontDescriptor::new("Noto")]);
        let mut composer: Composer<Duration> = Composer::new(&ComposerConfig::default(), fonts);

        assert!(composer.select_font("Noto".into()).is_empty());
        let actions = composer.mount();
        assert!(matches!(posts(&actions)[0], Outbound::EnableFont { data } if data.script_name == "Noto"));
    }

    #[test]
    fn font_tap_opens_emoji_panel_and_navigates() {
        let mut composer = mounted();
        let actions = composer.tap(Command::ChangeFont, ms(0));

        assert!(actions.contains(&AppAction::Navigate(Route::FontList)));
        assert!(composer.coordinator().panel(PanelId::Emoji).is_shown());
    }

    #[test]
    fn font_tap_with_panel_open_routes_to_keyboard() {
        let mut composer = mounted();
        let _ = composer.tap(Command::ChangeFont, ms(0));
        let offset_target = composer.coordinator().panel(PanelId::Emoji).offset().target();

        let actions = composer.tap(Command::ChangeFont, ms(10));

        assert!(actions.contains(&AppAction::FocusInput));
        assert!(!actions.contains(&AppAction::Navigate(Route::FontList)));
        assert_eq!(composer.coordinator().panel(PanelId::Emoji).offset().target(), offset_target);
    }

    #[test]
    fn image_tap_toggles_tool_tray() {
        let mut composer = mounted();
        let _ = composer.tap(Command::InsertImage, ms(0));
        assert_eq!(composer.coordinator().active_driver(), Some(DriverId::Panel(PanelId::ToolTray)));

        let _ = composer.tap(Command::InsertImage, ms(10));
        assert_eq!(composer.coordinator().active_driver(), None);
    }

    #[test]
    fn other_taps_forward_document_command() {
        let mut composer = mounted();
        for command in [
            Command::Bold,
            Command::Italic,
            Command::UnorderedList,
            Command::OrderedList,
            Command::Blockquote,
            Command::OpenCamera,
        ] {
            let actions = composer.tap(command, ms(0));
            assert!(
                matches!(actions.as_slice(), [AppAction::Post(Outbound::DocumentCommand(entry))] if entry.command == command),
                "{command}: {actions:?}"
            );
        }
        assert_eq!(composer.coordinator().active_driver(), None);
    }

    #[test]
    fn keyboard_rising_edge_posts_show_toolbar_once() {
        let mut composer = mounted();
        let first = composer.handle(AppEvent::KeyboardInsets(KeyboardInsets::bottom(280.0)), ms(0));
        let second = composer.handle(AppEvent::KeyboardInsets(KeyboardInsets::bottom(290.0)), ms(5));

        assert_eq!(posts(&first), vec![&Outbound::ShowToolbar]);
        assert!(posts(&second).is_empty());
    }

    #[test]
    fn toolbar_flag_is_idempotent() {
        let mut composer = mounted();

        assert_eq!(composer.handle(AppEvent::ToolbarShown, ms(0)), vec![AppAction::Render]);
        assert!(composer.toolbar_visible());
        assert!(composer.handle(AppEvent::ToolbarShown, ms(0)).is_empty());

        assert_eq!(composer.handle(AppEvent::ToolbarHidden, ms(0)), vec![AppAction::Render]);
        assert!(composer.handle(AppEvent::ToolbarHidden, ms(0)).is_empty());
    }

    #[test]
    fn selection_update_highlights_entries() {
        let mut composer = mounted();
        let update = SelectionUpdate::new("unordered-list-item", ["BOLD"]);
        let _ = composer.handle(AppEvent::SelectionChanged(update), ms(0));

        let view = composer.view(ms(0));
        assert_eq!(view.highlighted(), vec![Command::Bold, Command::UnorderedList]);
    }

    #[test]
    fn view_reflects_open_panel() {
        let mut composer = mounted();
        let _ = composer.tap(Command::InsertImage, ms(0));

        let view = composer.view(ms(1000));
        assert_eq!(view.composer_offset, -200.0);
        assert_eq!(view.panel(PanelId::ToolTray).map(|p| p.offset), Some(0.0));
        assert_eq!(view.panel(PanelId::Emoji).map(|p| p.offset), Some(300.0));
        assert_eq!(view.active_driver, Some(DriverId::Panel(PanelId::ToolTray)));
    }
}
