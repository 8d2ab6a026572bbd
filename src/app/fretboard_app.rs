//! Main application struct for the fretboard editor
//!
//! Hosts any number of multitools stacked vertically, forwards their note
//! events to the audio engine and the optional MIDI port, and carries out
//! their add/remove requests.

use std::time::{Duration, Instant};

use eframe::egui::{self, Align, Layout, RichText};

use crate::config::AppConfig;
use crate::engine::{
    default_channels, list_ports, AudioEngine, AudioError, EngineCommand, MidiOutput, UiHandle,
};
use crate::fretboard::{Multitool, MultitoolOptions, NoteEvent, Props, ToolEvent};

use super::input::{InputTranslator, PointerInput};
use super::multitool_view::MultitoolView;
use super::theme;

/// Repaint interval while something is animating or sounding.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Engine command for a note event.
pub fn engine_command(event: &NoteEvent) -> EngineCommand {
    match *event {
        NoteEvent::Start {
            key,
            midi_note,
            duration,
        } => EngineCommand::NoteOn {
            key: key.packed(),
            note: midi_note,
            duration,
        },
        NoteEvent::Stop { key } => EngineCommand::NoteOff { key: key.packed() },
    }
}

/// The stacked multitools, in display order.
pub struct ToolList {
    views: Vec<MultitoolView>,
    next_id: u64,
}

impl ToolList {
    pub fn new(options: &[MultitoolOptions]) -> Self {
        let mut list = Self {
            views: Vec::new(),
            next_id: 1,
        };
        for options in options {
            let id = list.take_id();
            list.views.push(MultitoolView::new(Multitool::new(id, options)));
        }
        list
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.views.iter().map(|v| v.tool().id()).collect()
    }

    pub fn get(&self, id: u64) -> Option<&MultitoolView> {
        self.views.iter().find(|v| v.tool().id() == id)
    }

    /// Insert a tool built from `props` right after `source`, or at the end.
    pub fn add_after(&mut self, source: Option<u64>, props: Props) -> u64 {
        let id = self.take_id();
        let view = MultitoolView::new(Multitool::from_props(id, props));
        let index = source
            .and_then(|source| self.views.iter().position(|v| v.tool().id() == source))
            .map_or(self.views.len(), |i| i + 1);
        self.views.insert(index, view);
        tracing::info!(id, index, "fretboard added");
        id
    }

    /// Remove a tool. Returns the stops for whatever it was still holding.
    pub fn remove(&mut self, id: u64) -> Vec<NoteEvent> {
        let Some(index) = self.views.iter().position(|v| v.tool().id() == id) else {
            return Vec::new();
        };
        let mut view = self.views.remove(index);
        view.tool_mut().silence();
        tracing::info!(id, "fretboard removed");
        view.tool_mut().drain_notes()
    }

    /// Keep focus only on `ids`.
    pub fn retain_focus(&mut self, ids: &[u64]) {
        for view in &mut self.views {
            if !ids.contains(&view.tool().id()) {
                view.tool_mut().blur();
            }
        }
    }

    /// Time until the next transition step of any tool.
    fn next_animation(&self, now: Instant) -> Option<Duration> {
        self.views
            .iter()
            .filter_map(|v| {
                let tool = v.tool();
                let menu = tool.menu().visibility().pending(now);
                let pressed = tool.buttons().iter().any(|b| b.is_pressed());
                menu.or(pressed.then_some(ANIMATION_FRAME))
            })
            .min()
    }
}

struct AudioOutput {
    engine: AudioEngine,
    /// Present while the stream runs. Each start gets a fresh pair of rings.
    handle: Option<UiHandle>,
    volume: f32,
}

impl AudioOutput {
    fn start(&mut self) -> Result<(), AudioError> {
        if self.engine.is_running() {
            return Ok(());
        }
        let (mut handle, engine_handle) = default_channels();
        self.engine.start(engine_handle)?;
        handle.send_command_lossy(EngineCommand::SetVolume(self.volume));
        self.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.handle = None;
        self.engine.stop()
    }
}

/// Main application state for the fretboard editor
pub struct FretboardApp {
    tools: ToolList,
    input: InputTranslator,
    audio: Option<AudioOutput>,
    midi: Option<MidiOutput>,
    /// Voice count last reported by the audio thread.
    voices: usize,
    /// Last error or notice for the status bar.
    status_message: Option<String>,
    theme_applied: bool,
}

impl FretboardApp {
    pub fn new(config: AppConfig) -> Self {
        let mut status_message = None;

        let audio = if config.audio.enabled {
            match AudioEngine::new() {
                Ok(engine) => {
                    let mut audio = AudioOutput {
                        engine,
                        handle: None,
                        volume: config.audio.volume,
                    };
                    if let Err(err) = audio.start() {
                        tracing::error!("audio unavailable: {}", err);
                        status_message = Some(format!("Audio unavailable: {}", err));
                    }
                    Some(audio)
                }
                Err(err) => {
                    tracing::error!("audio unavailable: {}", err);
                    status_message = Some(format!("Audio unavailable: {}", err));
                    None
                }
            }
        } else {
            None
        };

        let midi = match config.midi.output_port.as_deref() {
            Some(port) => match MidiOutput::connect(Some(port), config.midi.channel) {
                Ok(midi) => {
                    tracing::info!(port = midi.port_name(), "midi output connected");
                    Some(midi)
                }
                Err(err) => {
                    tracing::error!("midi output unavailable: {}", err);
                    if let Ok(ports) = list_ports() {
                        tracing::info!(?ports, "available midi outputs");
                    }
                    status_message = Some(format!("MIDI unavailable: {}", err));
                    None
                }
            },
            None => None,
        };

        Self {
            tools: ToolList::new(&config.tools),
            input: InputTranslator::new(),
            audio,
            midi,
            voices: 0,
            status_message,
            theme_applied: false,
        }
    }

    fn play(&mut self, notes: &[NoteEvent], now: Instant) {
        for note in notes {
            if let Some(handle) = self.audio.as_mut().and_then(|a| a.handle.as_mut()) {
                if handle.send_command(engine_command(note)).is_err() {
                    tracing::warn!(?note, "audio command buffer full, note dropped");
                }
            }
            if let Some(midi) = &mut self.midi {
                let result = match *note {
                    NoteEvent::Start {
                        key,
                        midi_note,
                        duration,
                    } => midi.note_on(
                        key.packed(),
                        midi_note,
                        duration.and_then(|d| Duration::try_from_secs_f32(d).ok()),
                        now,
                    ),
                    NoteEvent::Stop { key } => midi.note_off(key.packed()),
                };
                if let Err(err) = result {
                    tracing::error!("midi send failed: {}", err);
                    self.status_message = Some(err.to_string());
                }
            }
        }
    }

    fn handle_tool_event(&mut self, source: u64, event: ToolEvent, now: Instant) {
        match event {
            ToolEvent::AddTool(props) => {
                self.tools.add_after(Some(source), *props);
            }
            ToolEvent::RemoveTool => {
                let stops = self.tools.remove(source);
                self.play(&stops, now);
            }
            ToolEvent::FretboardResized { width } => {
                tracing::debug!(id = source, width, "fretboard resized");
            }
        }
    }

    /// Draw the top toolbar
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) -> ToolbarActions {
        let mut actions = ToolbarActions::default();

        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("FRETBOARD")
                    .size(18.0)
                    .color(theme::text::PRIMARY)
                    .strong(),
            );
            ui.add_space(20.0);
            ui.separator();

            if ui.button("+ Fretboard").clicked() {
                actions.add_tool = true;
            }
            if ui.button("Silence").clicked() {
                actions.silence = true;
            }
            if let Some(audio) = &self.audio {
                if audio.engine.is_running() {
                    if ui.button("⏹ Stop Audio").clicked() {
                        actions.stop_audio = true;
                    }
                } else if ui.button("▶ Start Audio").clicked() {
                    actions.start_audio = true;
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                match &self.audio {
                    Some(audio) if audio.engine.is_running() => {
                        ui.label(
                            RichText::new("● Audio")
                                .color(theme::accent::SUCCESS)
                                .small(),
                        );
                        ui.label(
                            RichText::new(format!(
                                "{}Hz • {}ch",
                                audio.engine.sample_rate(),
                                audio.engine.channels()
                            ))
                            .color(theme::text::SECONDARY)
                            .small(),
                        );
                    }
                    _ => {
                        ui.label(RichText::new("○ No audio").color(theme::text::DISABLED).small());
                    }
                }
                if let Some(midi) = &self.midi {
                    ui.label(
                        RichText::new(format!("MIDI: {}", midi.port_name()))
                            .color(theme::text::SECONDARY)
                            .small(),
                    );
                }
            });
        });

        actions
    }

    /// Draw the bottom status bar
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);

            if let Some(ref message) = self.status_message {
                ui.label(
                    RichText::new(format!("⚠ {}", message))
                        .color(theme::accent::ERROR)
                        .small(),
                );
            } else {
                ui.label(RichText::new("Ready").color(theme::text::SECONDARY).small());
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{} voices", self.voices))
                        .color(theme::text::SECONDARY)
                        .small(),
                );
                ui.label(
                    RichText::new(format!("{} fretboards", self.tools.len()))
                        .color(theme::text::DISABLED)
                        .small(),
                );
            });
        });
    }

    fn start_audio(&mut self) {
        if let Some(audio) = &mut self.audio {
            match audio.start() {
                Ok(()) => self.status_message = None,
                Err(err) => {
                    tracing::error!("audio start failed: {}", err);
                    self.status_message = Some(err.to_string());
                }
            }
        }
    }

    fn stop_audio(&mut self) {
        if let Some(audio) = &mut self.audio {
            match audio.stop() {
                Ok(()) => tracing::info!("audio stopped"),
                Err(err) => {
                    tracing::error!("audio stop failed: {}", err);
                    self.status_message = Some(err.to_string());
                }
            }
            self.voices = 0;
        }
    }

    fn silence_all(&mut self) {
        if let Some(handle) = self.audio.as_mut().and_then(|a| a.handle.as_mut()) {
            handle.send_command_lossy(EngineCommand::AllNotesOff);
        }
        if let Some(midi) = &mut self.midi {
            if let Err(err) = midi.all_notes_off() {
                tracing::error!("midi send failed: {}", err);
            }
        }
    }
}

/// Actions collected from the toolbar for deferred execution
#[derive(Default)]
struct ToolbarActions {
    add_tool: bool,
    silence: bool,
    start_audio: bool,
    stop_audio: bool,
}

impl eframe::App for FretboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        let now = Instant::now();
        let events = ctx.input(|i| i.events.clone());
        let input = self.input.translate(&events);
        let popup_open = ctx.memory(|m| m.any_popup_open());

        if let Some(handle) = self.audio.as_mut().and_then(|a| a.handle.as_mut()) {
            if let Some(count) = handle.latest_voice_count() {
                self.voices = count;
            }
        }
        if let Some(midi) = &mut self.midi {
            if let Err(err) = midi.tick(now) {
                tracing::error!("midi send failed: {}", err);
            }
        }

        let toolbar_actions = egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::none()
                    .fill(theme::background::PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 8.0)),
            )
            .show(ctx, |ui| self.draw_toolbar(ui))
            .inner;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(theme::background::PANEL)
                    .inner_margin(egui::Margin::symmetric(0.0, 4.0)),
            )
            .show(ctx, |ui| self.draw_status_bar(ui));

        let outputs = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .drag_to_scroll(false)
                    .show(ui, |ui| {
                        let mut outputs = Vec::with_capacity(self.tools.len());
                        for view in &mut self.tools.views {
                            let id = view.tool().id();
                            outputs.push((id, view.show(ui, now, &input, popup_open)));
                            ui.add_space(12.0);
                        }
                        outputs
                    })
                    .inner
            })
            .inner;

        // Handle deferred work once no panel borrows self
        let pressed = input
            .pointers
            .iter()
            .any(|p| matches!(p, PointerInput::Down { .. }));
        if pressed {
            let focused: Vec<u64> = outputs
                .iter()
                .filter(|(_, output)| output.took_focus)
                .map(|(id, _)| *id)
                .collect();
            self.tools.retain_focus(&focused);
        }
        for (id, output) in outputs {
            self.play(&output.notes, now);
            for event in output.events {
                self.handle_tool_event(id, event, now);
            }
        }

        if toolbar_actions.add_tool {
            self.tools.add_after(None, Props::default());
        }
        if toolbar_actions.silence {
            self.silence_all();
        }
        if toolbar_actions.start_audio {
            self.start_audio();
        }
        if toolbar_actions.stop_audio {
            self.stop_audio();
        }

        let mut next = self.tools.next_animation(now);
        if self.midi.as_ref().is_some_and(|m| m.has_pending()) {
            next = Some(next.map_or(ANIMATION_FRAME, |d| d.min(ANIMATION_FRAME)));
        }
        if let Some(delay) = next {
            ctx.request_repaint_after(delay);
        }
    }
}
