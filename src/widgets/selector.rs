//! Drop-down selector with optional group headers.

use std::hash::Hash;

use eframe::egui::{ComboBox, Response, RichText, Ui};

/// A run of options under an optional header.
#[derive(Clone, Debug)]
pub struct SelectorGroup<T> {
    pub label: Option<String>,
    pub options: Vec<(T, String)>,
}

impl<T> SelectorGroup<T> {
    /// A group without a header.
    pub fn plain(options: Vec<(T, String)>) -> Self {
        Self { label: None, options }
    }

    pub fn labeled(label: impl Into<String>, options: Vec<(T, String)>) -> Self {
        Self {
            label: Some(label.into()),
            options,
        }
    }
}

pub struct SelectorResponse<T> {
    /// Response of the closed combo box.
    pub response: Response,
    /// The option clicked this frame, even if it equals the current one.
    pub changed: Option<T>,
}

/// Text of `current` among `groups`, or empty when nothing matches.
pub fn selected_text<'a, T: PartialEq>(groups: &'a [SelectorGroup<T>], current: Option<&T>) -> &'a str {
    let Some(current) = current else {
        return "";
    };
    groups
        .iter()
        .flat_map(|g| g.options.iter())
        .find(|(value, _)| value == current)
        .map(|(_, text)| text.as_str())
        .unwrap_or("")
}

pub fn selector<T: Clone + PartialEq>(
    ui: &mut Ui,
    id_salt: impl Hash,
    groups: &[SelectorGroup<T>],
    current: Option<&T>,
) -> SelectorResponse<T> {
    let mut changed = None;
    let inner = ComboBox::new(id_salt, "")
        .selected_text(selected_text(groups, current))
        .show_ui(ui, |ui| {
            for group in groups {
                if let Some(label) = &group.label {
                    ui.label(RichText::new(label.as_str()).strong());
                }
                for (value, text) in &group.options {
                    if ui.selectable_label(current == Some(value), text.as_str()).clicked() {
                        changed = Some(value.clone());
                    }
                }
            }
        });

    SelectorResponse {
        response: inner.response,
        changed,
    }
}
