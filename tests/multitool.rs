//! End-to-end behavior through the public `Multitool` API.

use std::collections::BTreeSet;

use fretboard_multitool::data::{NOTE_LABELS, NOTE_SEQUENCES};
use fretboard_multitool::fretboard::{
    active_positions, compute_active_labels, Action, Multitool, MultitoolOptions, NoCapture,
    NoteSizeChoice, NoteSizes, PointerTarget, Props, Render,
};

fn tool(options: MultitoolOptions) -> Multitool {
    Multitool::new(1, &options)
}

#[test]
fn test_c_major_over_twelve_frets() {
    let tool = tool(MultitoolOptions {
        root_note: Some(0),
        sequence_name: Some("Ionian / Major".to_string()),
        from_fret: Some(0),
        to_fret: Some(12),
        ..Default::default()
    });
    let positions = active_positions(tool.props());
    assert!(!positions.is_empty());

    let classes: BTreeSet<u8> = positions.iter().map(|p| p.pitch_class).collect();
    assert_eq!(classes, BTreeSet::from([0, 2, 4, 5, 7, 9, 11]));
    assert!(positions.iter().all(|p| p.fret <= 12));

    // Every in-scale cell of the grid is visible and nothing else is
    let visible = tool.grid().cells().iter().filter(|c| c.note.visible).count();
    assert_eq!(visible, positions.len());
}

#[test]
fn test_note_name_labels_ignore_the_root() {
    let tool = tool(MultitoolOptions {
        root_note: Some(2),
        sequence_name: Some("Ionian / Major".to_string()),
        note_labels_name: Some("Pitch Class (♯)".to_string()),
        ..Default::default()
    });
    let label_of = |string: usize, fret: u8| {
        tool.grid()
            .cells()
            .iter()
            .find(|c| c.position.string == string && c.position.fret == fret)
            .map(|c| c.label.clone())
    };
    assert_eq!(label_of(2, 0).as_deref(), Some("D"));
    assert_eq!(label_of(0, 2).as_deref(), Some("F♯"));
    assert_eq!(label_of(1, 0).as_deref(), Some("A"));
}

#[test]
fn test_root_offsets_the_scale() {
    let tool = tool(MultitoolOptions {
        root_note: Some(7),
        sequence_name: Some("Ionian / Major".to_string()),
        ..Default::default()
    });
    let classes: BTreeSet<u8> = active_positions(tool.props())
        .iter()
        .map(|p| p.pitch_class)
        .collect();
    assert_eq!(classes, BTreeSet::from([7, 9, 11, 0, 2, 4, 6]));
}

#[test]
fn test_blank_yields_nothing_for_any_root_or_labels() {
    for root in 0..12 {
        for scheme in NOTE_LABELS {
            let mut tool = tool(MultitoolOptions {
                root_note: Some(root),
                note_labels_name: Some(scheme.name.to_string()),
                ..Default::default()
            });
            tool.dispatch(Action::ChangeSequence("Blank".to_string()));
            assert!(active_positions(tool.props()).is_empty());
            assert!(tool.grid().cells().iter().all(|c| !c.note.visible));
        }
    }
}

#[test]
fn test_key_one_matches_selecting_ionian() {
    let options = MultitoolOptions {
        sequence_name: Some("Lydian".to_string()),
        note_labels_name: Some("Relative".to_string()),
        ..Default::default()
    };

    let mut by_key = tool(options.clone());
    by_key.pointer_down(1, PointerTarget::Background, &mut NoCapture);
    by_key.pointer_up(1);
    assert!(by_key.on_key("1"));

    let mut by_menu = tool(options);
    by_menu.dispatch(Action::ChangeSequence("Ionian / Major".to_string()));

    assert_eq!(by_key.props(), by_menu.props());
    assert_eq!(by_key.props().note_labels, compute_active_labels("Ionian / Major", "Relative"));
    assert_eq!(by_key.menu().selections(), by_menu.menu().selections());
}

#[test]
fn test_keys_are_ignored_without_focus() {
    let mut tool = tool(MultitoolOptions::default());
    assert!(!tool.on_key("0"));
    assert_eq!(tool.props().sequence_name, "Ionian / Major");
}

#[test]
fn test_labels_without_overrides_equal_the_scheme() {
    for category in NOTE_SEQUENCES {
        for sequence in category.sequences {
            for scheme in NOTE_LABELS {
                let labels = compute_active_labels(sequence.name, scheme.name);
                let overrides = sequence.overrides_for(scheme.name).unwrap_or(&[]);
                for (index, label) in labels.iter().enumerate() {
                    match overrides.iter().find(|(i, _)| *i as usize == index) {
                        Some((_, replacement)) => assert_eq!(label, replacement),
                        None => assert_eq!(label, scheme.labels[index]),
                    }
                }
            }
        }
    }
    // Computing overrides never leaks into the shared table
    let first = compute_active_labels("Lydian", "Relative");
    let second = compute_active_labels("Ionian / Major", "Relative");
    assert_ne!(first, second);
    assert_eq!(second, compute_active_labels("Ionian / Major", "Relative"));
}

#[test]
fn test_fret_range_clamps_instead_of_rejecting() {
    let mut tool = tool(MultitoolOptions {
        from_fret: Some(5),
        to_fret: Some(9),
        ..Default::default()
    });
    tool.dispatch(Action::ChangeToFret(3));
    assert_eq!((tool.props().from_fret, tool.props().to_fret), (3, 3));

    tool.dispatch(Action::ChangeFromFret(20));
    assert_eq!((tool.props().from_fret, tool.props().to_fret), (20, 20));

    tool.dispatch(Action::ChangeToFret(99));
    assert_eq!((tool.props().from_fret, tool.props().to_fret), (20, 24));
    assert_eq!(tool.menu().selections().to_fret, 24);
}

#[test]
fn test_small_note_size_is_idempotent() {
    let mut tool = tool(MultitoolOptions {
        note_sizes: Some(NoteSizes {
            first: 10.0,
            second: 6.0,
        }),
        ..Default::default()
    });

    tool.note_size_pressed();
    let render = tool.dispatch(Action::ChangeNoteSize(NoteSizeChoice::Small));
    assert_eq!(render, Render::Update { reset_sizes: true });
    assert_eq!(tool.props().note_sizes, NoteSizes { first: 6.0, second: 10.0 });

    tool.note_size_pressed();
    assert_eq!(tool.menu().selections().note_size, None);
    let again = tool.dispatch(Action::ChangeNoteSize(NoteSizeChoice::Small));
    assert_eq!(again, Render::Update { reset_sizes: true });
    assert_eq!(tool.props().note_sizes, NoteSizes { first: 6.0, second: 10.0 });
    assert!(tool
        .grid()
        .cells()
        .iter()
        .all(|c| c.note.size == 6.0));
}

#[test]
fn test_pointer_ids_never_stick() {
    let mut tool = tool(MultitoolOptions::default());
    let targets = [
        PointerTarget::Grid(0),
        PointerTarget::Grid(3),
        PointerTarget::Button,
        PointerTarget::Background,
        PointerTarget::Selector,
    ];
    let mut seed: u32 = 0x1234_5678;
    for _ in 0..1000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let id = u64::from(seed % 4);
        match (seed >> 4) % 4 {
            0 | 1 => {
                let target = targets[(seed >> 8) as usize % targets.len()];
                tool.pointer_down(id, target, &mut NoCapture);
            }
            2 => tool.pointer_up(id),
            _ => tool.pointer_leave(id, true),
        }
        let ids = tool.grid().pointer_down_ids().as_slice();
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    for id in 0..4 {
        tool.pointer_up(id);
    }
    assert!(tool.grid().pointer_down_ids().is_empty());
}

#[test]
fn test_add_tool_snapshot_builds_identical_sibling() {
    let mut source = tool(MultitoolOptions {
        instrument_name: Some("Bass".to_string()),
        root_note: Some(2),
        ..Default::default()
    });
    source.dispatch(Action::ChangeColorTheme("Black".to_string()));
    source.press_button(
        fretboard_multitool::fretboard::ButtonKind::Plus,
        std::time::Instant::now(),
    );

    let events = source.drain_events();
    let snapshot: Props = match events.as_slice() {
        [fretboard_multitool::fretboard::ToolEvent::AddTool(props)] => (**props).clone(),
        other => panic!("unexpected events {:?}", other),
    };
    let sibling = Multitool::from_props(2, snapshot);
    assert_eq!(sibling.props(), source.props());
    assert_eq!(sibling.grid().cells().len(), source.grid().cells().len());
}
