use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use note_transcriber::{
    audio_to_midi, detect_note, postprocessing::helpers::ported::librosa::midi_to_note,
    preprocessing::load_audio::load_audio, NoteFrequencyTable, TranscriptionConfig,
};

#[derive(Parser)]
#[command(name = "note-transcriber", about = "Convert recorded audio into notes", version)]
struct Cli {
    /// Extra debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe a WAV file into a MIDI file
    Transcribe {
        /// Input WAV file
        input: PathBuf,
        /// Output MIDI file
        output: PathBuf,
        /// TOML file with transcription settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Drop notes shorter than this many seconds
        #[arg(long)]
        min_note_duration: Option<f64>,
    },
    /// Detect the single note held in each WAV file
    Detect {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Command::Transcribe { input, output, config, min_note_duration } => {
            let mut config = match config {
                Some(path) => TranscriptionConfig::load(path)?,
                None => TranscriptionConfig::default(),
            };
            if let Some(min_note_duration) = min_note_duration {
                config.min_note_duration = min_note_duration;
            }

            let notes = audio_to_midi(&input, &output, &config)?;
            for note in &notes {
                println!(
                    "{:>4} {:<4} {:>8.3}s -> {:>8.3}s",
                    note.pitch,
                    midi_to_note(note.pitch),
                    note.start_seconds,
                    note.end_seconds
                );
            }
            info!("{} notes written to {}", notes.len(), output.display());
        }
        Command::Detect { inputs } => {
            let table = NoteFrequencyTable::standard();
            for input in inputs {
                let (samples, sample_rate) = load_audio(&input, None)?;
                let detected = detect_note(&samples.into_raw_vec(), sample_rate, &table)?;

                println!("{}", input.display());
                println!("Detected Frequency: {:.2}", detected.frequency);
                println!("Closest Musical Note: {}", detected.label);
                match detected.midi {
                    Some(midi) => println!("Midi Note = {}\n", midi),
                    None => println!("Midi Note = none\n"),
                }
            }
        }
    }

    Ok(())
}
