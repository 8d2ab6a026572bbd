//! Per-instance fretboard configuration.
//!
//! `Props` is the single source of truth every control reads and writes.
//! It is created once per multitool from defaults merged with caller options
//! and is only ever changed through [`Props::apply`](super::actions).

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::data::{color_themes, index_from_name, instruments, note_colors, note_labels, sequences};
use super::positions::{clamp_fret, compute_active_labels};

/// Pitch class 0-11. Always taken mod 12.
pub type PitchClass = u8;

/// Interaction mode of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Play,
    #[serde(rename = "Edit One")]
    EditOne,
    #[serde(rename = "Edit All")]
    EditAll,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Play, Mode::EditOne, Mode::EditAll];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Play => "Play",
            Mode::EditOne => "Edit One",
            Mode::EditAll => "Edit All",
        }
    }
}

/// Which hand frets the instrument. Left mirrors the grid horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Hand::Left => "Left",
            Hand::Right => "Right",
        }
    }
}

/// Option shown in the note size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSizeChoice {
    Large,
    Small,
}

impl NoteSizeChoice {
    pub const ALL: [NoteSizeChoice; 2] = [NoteSizeChoice::Large, NoteSizeChoice::Small];

    pub fn name(&self) -> &'static str {
        match self {
            NoteSizeChoice::Large => "Large",
            NoteSizeChoice::Small => "Small",
        }
    }
}

/// The two configured note sizes. `first` is what notes get on reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteSizes {
    pub first: f32,
    pub second: f32,
}

impl Default for NoteSizes {
    fn default() -> Self {
        Self {
            first: 10.0,
            second: 6.0,
        }
    }
}

impl NoteSizes {
    /// Reorder so `first` is the size the user picked. The pair itself never changes.
    pub fn chosen(&self, choice: NoteSizeChoice) -> NoteSizes {
        let (large, small) = if self.first > self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        };
        match choice {
            NoteSizeChoice::Large => NoteSizes {
                first: large,
                second: small,
            },
            NoteSizeChoice::Small => NoteSizes {
                first: small,
                second: large,
            },
        }
    }

    /// The selector option matching the current ordering.
    pub fn choice(&self) -> NoteSizeChoice {
        if self.first > self.second {
            NoteSizeChoice::Large
        } else {
            NoteSizeChoice::Small
        }
    }
}

/// How long a played note sounds.
///
/// Serialized as seconds: `0` means while touching, `-1` means indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub enum NoteDuration {
    Touch,
    Seconds(f32),
    Indefinite,
}

impl Default for NoteDuration {
    fn default() -> Self {
        NoteDuration::Seconds(1.0)
    }
}

impl From<f32> for NoteDuration {
    fn from(seconds: f32) -> Self {
        if seconds == 0.0 || seconds.is_nan() {
            NoteDuration::Touch
        } else if seconds < 0.0 {
            NoteDuration::Indefinite
        } else {
            NoteDuration::Seconds(seconds)
        }
    }
}

impl From<NoteDuration> for f32 {
    fn from(duration: NoteDuration) -> Self {
        duration.as_seconds()
    }
}

impl NoteDuration {
    /// Selector options in display order.
    pub const OPTIONS: [NoteDuration; 6] = [
        NoteDuration::Touch,
        NoteDuration::Seconds(0.5),
        NoteDuration::Seconds(1.0),
        NoteDuration::Seconds(2.0),
        NoteDuration::Seconds(3.0),
        NoteDuration::Indefinite,
    ];

    pub fn as_seconds(&self) -> f32 {
        match self {
            NoteDuration::Touch => 0.0,
            NoteDuration::Seconds(s) => *s,
            NoteDuration::Indefinite => -1.0,
        }
    }

    pub fn label(&self) -> String {
        match self {
            NoteDuration::Touch => "Touch".to_string(),
            NoteDuration::Seconds(s) => format!("{} s", s),
            NoteDuration::Indefinite => "∞ s".to_string(),
        }
    }
}

/// Background and foreground colors as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub background: String,
    pub foreground: String,
}

impl ColorTheme {
    pub fn from_def(def: &color_themes::ColorThemeDef) -> Self {
        Self {
            background: def.background.to_string(),
            foreground: def.foreground.to_string(),
        }
    }

    /// Theme name for selector display, if this is a stock theme.
    pub fn name(&self) -> Option<&'static str> {
        color_themes::name_from_value(&self.background, &self.foreground)
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::from_def(color_themes::default_theme())
    }
}

/// Construction options. Anything left out falls back to instrument defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultitoolOptions {
    pub instrument_name: Option<String>,
    /// A pitch class, or a note name such as `"D"` or `"Bb"`.
    #[serde(deserialize_with = "root_note_from_json")]
    pub root_note: Option<PitchClass>,
    pub sequence_name: Option<String>,
    pub from_fret: Option<u8>,
    pub to_fret: Option<u8>,
    pub mode: Option<Mode>,
    pub hand: Option<Hand>,
    pub note_labels_name: Option<String>,
    pub note_colors: Option<[String; 12]>,
    pub note_sizes: Option<NoteSizes>,
    pub note_duration: Option<NoteDuration>,
    pub color_theme: Option<ColorTheme>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RootNoteValue {
    Index(u8),
    Name(String),
}

fn root_note_from_json<'de, D>(deserializer: D) -> Result<Option<PitchClass>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RootNoteValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RootNoteValue::Index(index)) => Ok(Some(index % 12)),
        Some(RootNoteValue::Name(name)) => index_from_name(&name)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown note name {:?}", name))),
    }
}

/// Live configuration of one fretboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    pub instrument_name: String,
    /// Open-string MIDI notes, lowest string first.
    pub tuning: Vec<u8>,
    pub root_note: PitchClass,
    pub sequence_name: String,
    pub sequence: Vec<u8>,
    pub from_fret: u8,
    pub to_fret: u8,
    pub mode: Mode,
    pub hand: Hand,
    pub note_labels_name: String,
    /// Base scheme with the sequence's overrides already merged.
    pub note_labels: [String; 12],
    pub note_colors: [String; 12],
    pub note_sizes: NoteSizes,
    pub note_duration: NoteDuration,
    pub color_theme: ColorTheme,
}

impl Default for Props {
    fn default() -> Self {
        Self::from_options(&MultitoolOptions::default())
    }
}

impl Props {
    /// Build props from defaults merged with `options`.
    ///
    /// Unknown names fall back to the first entry of their table.
    pub fn from_options(options: &MultitoolOptions) -> Self {
        let instrument = match options.instrument_name.as_deref() {
            Some(name) => instruments::find(name).unwrap_or_else(|| {
                tracing::warn!(name, "unknown instrument, using default");
                instruments::default_instrument()
            }),
            None => instruments::default_instrument(),
        };

        let sequence_name = resolve_sequence_name(
            options.sequence_name.as_deref().unwrap_or("Ionian / Major"),
        );
        let note_labels_name =
            resolve_label_scheme_name(options.note_labels_name.as_deref().unwrap_or("None"));

        let mut props = Self {
            instrument_name: instrument.name.to_string(),
            tuning: instrument.tuning.to_vec(),
            root_note: options.root_note.unwrap_or(0) % 12,
            sequence: Vec::new(),
            note_labels: compute_active_labels(&sequence_name, &note_labels_name),
            sequence_name,
            from_fret: instrument.from_fret,
            to_fret: instrument.to_fret,
            mode: options.mode.unwrap_or_default(),
            hand: options.hand.unwrap_or_default(),
            note_labels_name,
            note_colors: options
                .note_colors
                .clone()
                .unwrap_or_else(|| note_colors::default_colors().to_owned_colors()),
            note_sizes: options.note_sizes.unwrap_or_default(),
            note_duration: options.note_duration.unwrap_or_default(),
            color_theme: options.color_theme.clone().unwrap_or_default(),
        };
        props.sequence = sequences::find(&props.sequence_name)
            .map(|s| s.sequence.to_vec())
            .unwrap_or_default();

        // Apply both bounds through the clamp so from <= to holds
        if let Some(from) = options.from_fret {
            props.from_fret = clamp_fret(from);
        }
        if let Some(to) = options.to_fret {
            props.to_fret = clamp_fret(to);
        }
        if props.from_fret > props.to_fret {
            props.from_fret = props.to_fret;
        }

        props
    }

    /// Name of the note colors for selector display, if a stock scheme.
    pub fn note_colors_name(&self) -> Option<&'static str> {
        note_colors::name_from_value(&self.note_colors)
    }
}

/// A known sequence name, or the first sequence when unknown.
pub(crate) fn resolve_sequence_name(name: &str) -> String {
    match sequences::find(name) {
        Some(s) => s.name.to_string(),
        None => {
            let fallback = sequences::NOTE_SEQUENCES[0].sequences[0].name;
            tracing::warn!(name, fallback, "unknown sequence");
            fallback.to_string()
        }
    }
}

/// A known label scheme name, or the first scheme when unknown.
pub(crate) fn resolve_label_scheme_name(name: &str) -> String {
    match note_labels::find(name) {
        Some(s) => s.name.to_string(),
        None => {
            let fallback = note_labels::NOTE_LABELS[0].name;
            tracing::warn!(name, fallback, "unknown label scheme");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_props() {
        let props = Props::default();
        assert_eq!(props.instrument_name, "Guitar");
        assert_eq!(props.tuning, vec![40, 45, 50, 55, 59, 64]);
        assert_eq!(props.root_note, 0);
        assert_eq!(props.sequence_name, "Ionian / Major");
        assert_eq!(props.sequence, vec![0, 2, 4, 5, 7, 9, 11]);
        assert_eq!((props.from_fret, props.to_fret), (0, 12));
        assert_eq!(props.mode, Mode::Play);
        assert_eq!(props.hand, Hand::Right);
        assert_eq!(props.note_labels_name, "None");
        assert!(props.note_labels.iter().all(String::is_empty));
    }

    #[test]
    fn test_options_override_defaults() {
        let props = Props::from_options(&MultitoolOptions {
            instrument_name: Some("Bass".to_string()),
            root_note: Some(14),
            sequence_name: Some("Lydian".to_string()),
            note_labels_name: Some("Relative".to_string()),
            from_fret: Some(3),
            to_fret: Some(7),
            ..Default::default()
        });
        assert_eq!(props.tuning.len(), 4);
        assert_eq!(props.root_note, 2);
        assert_eq!(props.note_labels[6], "♯4");
        assert_eq!((props.from_fret, props.to_fret), (3, 7));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let props = Props::from_options(&MultitoolOptions {
            instrument_name: Some("Theremin".to_string()),
            sequence_name: Some("Nope".to_string()),
            note_labels_name: Some("Klingon".to_string()),
            ..Default::default()
        });
        assert_eq!(props.instrument_name, "Guitar");
        assert_eq!(props.sequence_name, "Ionian / Major");
        assert_eq!(props.note_labels_name, "None");
    }

    #[test]
    fn test_inverted_range_option_is_clamped() {
        let props = Props::from_options(&MultitoolOptions {
            from_fret: Some(30),
            to_fret: Some(5),
            ..Default::default()
        });
        assert_eq!((props.from_fret, props.to_fret), (5, 5));
    }

    #[test]
    fn test_note_sizes_chosen() {
        let sizes = NoteSizes {
            first: 10.0,
            second: 6.0,
        };
        let small = sizes.chosen(NoteSizeChoice::Small);
        assert_eq!((small.first, small.second), (6.0, 10.0));
        // Choosing again is a no-op
        assert_eq!(small.chosen(NoteSizeChoice::Small), small);
        assert_eq!(small.chosen(NoteSizeChoice::Large), sizes);
        assert_eq!(sizes.choice(), NoteSizeChoice::Large);
        assert_eq!(small.choice(), NoteSizeChoice::Small);
    }

    #[test]
    fn test_note_duration_from_seconds() {
        assert_eq!(NoteDuration::from(0.0), NoteDuration::Touch);
        assert_eq!(NoteDuration::from(-1.0), NoteDuration::Indefinite);
        assert_eq!(NoteDuration::from(2.0), NoteDuration::Seconds(2.0));
        assert_eq!(NoteDuration::Indefinite.as_seconds(), -1.0);
        assert_eq!(NoteDuration::Seconds(0.5).label(), "0.5 s");
    }

    #[test]
    fn test_root_note_by_name_or_number() {
        let parse = |json: &str| serde_json::from_str::<MultitoolOptions>(json).map(|o| o.root_note);
        assert_eq!(parse(r#"{ "rootNote": "D" }"#).unwrap(), Some(2));
        assert_eq!(parse(r#"{ "rootNote": "Bb" }"#).unwrap(), Some(10));
        assert_eq!(parse(r#"{ "rootNote": 14 }"#).unwrap(), Some(2));
        assert_eq!(parse(r#"{ "rootNote": null }"#).unwrap(), None);
        assert_eq!(parse("{}").unwrap(), None);
        assert!(parse(r#"{ "rootNote": "H" }"#).is_err());
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let json = r##"{
            "instrumentName": "Ukulele",
            "rootNote": 9,
            "mode": "Edit One",
            "noteDuration": -1,
            "noteSizes": { "first": 6, "second": 12 },
            "colorTheme": { "background": "#000000", "foreground": "#ffffff" }
        }"##;
        let options: MultitoolOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.instrument_name.as_deref(), Some("Ukulele"));
        assert_eq!(options.root_note, Some(9));
        assert_eq!(options.mode, Some(Mode::EditOne));
        assert_eq!(options.note_duration, Some(NoteDuration::Indefinite));
        assert_eq!(options.note_sizes.map(|s| s.choice()), Some(NoteSizeChoice::Small));

        let props = Props::from_options(&options);
        assert_eq!(props.color_theme.name(), Some("Black"));
    }
}
