use midly::num::{u15, u24, u28, u4, u7};
use midly::Format;
use midly::Header;
use midly::MetaMessage;
use midly::MidiMessage;
use midly::Smf;
use midly::Timing;
use midly::Track;
use midly::TrackEvent;
use midly::TrackEventKind;

use std::io::Cursor;
use std::path::Path;

use log::info;

use crate::constants::{MAX_TEMPO_MICROS, PIANO_PROGRAM, TICKS_PER_BEAT};
use crate::error::{Error, Result};

use super::note_event_times::NoteEvent;

#[derive(Debug, Clone)]
struct TrackEventAbsolute<'a> {
    tick: u32,
    // NoteOff (0) sorts before NoteOn (1) on the same tick
    order: u8,
    kind: TrackEventKind<'a>,
}

fn seconds_to_tick(seconds: f64, ticks_per_second: f64) -> u32 {
    (seconds.max(0.0) * ticks_per_second).round() as u32
}

pub fn generate_ordered_midi_events(note_events: &[NoteEvent], ticks_per_second: f64) -> Vec<TrackEvent<'static>> {
    let channel = u4::new(0);

    let mut track_events_absolute: Vec<TrackEventAbsolute> = vec![];
    for note_event in note_events {
        let key = u7::new(note_event.pitch.min(127));
        let vel = u7::new(note_event.velocity.min(127));

        let start_tick = seconds_to_tick(note_event.start_seconds, ticks_per_second);
        track_events_absolute.push(TrackEventAbsolute {
            tick: start_tick,
            order: 1,
            kind: TrackEventKind::Midi { channel, message: MidiMessage::NoteOn { key, vel } },
        });

        // A note always lasts at least one tick
        let end_tick = seconds_to_tick(note_event.end_seconds, ticks_per_second).max(start_tick + 1);
        track_events_absolute.push(TrackEventAbsolute {
            tick: end_tick,
            order: 0,
            kind: TrackEventKind::Midi { channel, message: MidiMessage::NoteOff { key, vel } },
        });
    }

    track_events_absolute.sort_by_key(|event| (event.tick, event.order));

    let mut track_events = vec![];
    let mut previous_tick = 0;
    for track_event_absolute in track_events_absolute {
        track_events.push(TrackEvent {
            delta: u28::new(track_event_absolute.tick - previous_tick),
            kind: track_event_absolute.kind,
        });
        previous_tick = track_event_absolute.tick;
    }

    track_events
}

/// Generate MIDI file data from note events.
///
/// # Arguments
///
/// * `notes` - List of time-based note events.
/// * `beats_per_minute` - Tempo written to the file; note times are kept in seconds.
///
/// # Returns
///
/// * A vector of bytes representing a single-track piano MIDI file.
pub fn generate_midi_file_data(notes: &[NoteEvent], beats_per_minute: u32) -> Result<Vec<u8>> {
    if beats_per_minute == 0 {
        return Err(Error::invalid("beats_per_minute must be positive"));
    }
    let micros_per_beat = 60_000_000 / beats_per_minute;
    if micros_per_beat > MAX_TEMPO_MICROS {
        return Err(Error::invalid(format!(
            "{} bpm is too slow for a tempo event ({} us per beat)",
            beats_per_minute, micros_per_beat
        )));
    }

    let timing = Timing::Metrical(u15::new(TICKS_PER_BEAT));
    let ticks_per_second = (TICKS_PER_BEAT as f64) * (beats_per_minute as f64) / 60.0;

    let mut smf = Smf::new(Header { format: Format::SingleTrack, timing });
    let mut track = Track::new();

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(micros_per_beat))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::ProgramChange { program: u7::new(PIANO_PROGRAM) },
        },
    });

    track.extend(generate_ordered_midi_events(notes, ticks_per_second));

    track.push(TrackEvent { delta: u28::new(0), kind: TrackEventKind::Meta(MetaMessage::EndOfTrack) });

    smf.tracks.push(track);

    let mut buffer = Vec::new();
    smf.write_std(&mut Cursor::new(&mut buffer))?;

    Ok(buffer)
}

/// Write `notes` to a standard MIDI file at `path`.
pub fn write_midi_file<P: AsRef<Path>>(notes: &[NoteEvent], path: P, beats_per_minute: u32) -> Result<()> {
    let buffer = generate_midi_file_data(notes, beats_per_minute)?;
    std::fs::write(path.as_ref(), &buffer)?;
    info!("Wrote {} notes to {}", notes.len(), path.as_ref().display());
    Ok(())
}
