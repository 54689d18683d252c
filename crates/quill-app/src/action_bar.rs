//! Action bar entries.

use quill_proto::{ActionDescriptor, Command};

use crate::Selection;

/// Ordered entries of the action bar above the keyboard or panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBar {
    entries: Vec<ActionDescriptor>,
}

impl Default for ActionBar {
    fn default() -> Self {
        Self {
            entries: vec![
                ActionDescriptor::inline("Bold", Command::Bold, "format-bold"),
                ActionDescriptor::inline("Italic", Command::Italic, "format-italic"),
                ActionDescriptor::block("UL", Command::UnorderedList, "format-list-bulleted"),
                ActionDescriptor::block("OL", Command::OrderedList, "format-list-numbered"),
                ActionDescriptor::block("BLOCKQUOTE", Command::Blockquote, "format-quote-open"),
                ActionDescriptor::block("IMAGE", Command::InsertImage, "image"),
                ActionDescriptor::block("CAMERA", Command::OpenCamera, "camera"),
                ActionDescriptor::block("FONT", Command::ChangeFont, "format-font")
                    .with_navigation(),
            ],
        }
    }
}

impl ActionBar {
    /// Bar with custom entries.
    pub fn new(entries: Vec<ActionDescriptor>) -> Self {
        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[ActionDescriptor] {
        &self.entries
    }

    /// Entry for a command. `None` if the bar does not carry it.
    pub fn entry(&self, command: Command) -> Option<&ActionDescriptor> {
        self.entries.iter().find(|entry| entry.command == command)
    }

    /// Commands of the entries highlighted for `selection`, in bar order.
    pub fn highlighted(&self, selection: &Selection) -> Vec<Command> {
        self.entries
            .iter()
            .map(|entry| entry.command)
            .filter(|command| selection.is_active(*command))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use quill_proto::SelectionUpdate;

    use super::*;

    #[test]
    fn default_bar_carries_every_command_once() {
        let bar = ActionBar::default();
        assert_eq!(bar.entries().len(), Command::ALL.len());
        for command in Command::ALL {
            assert!(bar.entry(command).is_some(), "{command} missing");
        }
    }

    #[test]
    fn only_font_entry_navigates() {
        let bar = ActionBar::default();
        let navigating: Vec<_> =
            bar.entries().iter().filter(|e| e.navigation).map(|e| e.command).collect();
        assert_eq!(navigating, vec![Command::ChangeFont]);
    }

    #[test]
    fn highlight_follows_selection() {
        let bar = ActionBar::default();
        let mut selection = Selection::default();
        selection.merge(SelectionUpdate::new("unordered-list-item", ["BOLD"]));

        assert_eq!(bar.highlighted(&selection), vec![Command::Bold, Command::UnorderedList]);
    }
}
