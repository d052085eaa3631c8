#![allow(dead_code)]

use remora_core::dispatch::dispatch_command;
use remora_core::host::memory::MemorySong;
use remora_core::{CommandError, Config};
use remora_types::Command;
use serde_json::Value;

/// A small set: a drum track, a synth track with an effect chain, one return.
pub const FIXTURE: &str = r#"{
    "tracks": [
        {
            "name": "Drums",
            "devices": [
                {
                    "name": "Kit",
                    "class_name": "DrumGroupDevice",
                    "class_display_name": "Drum Rack",
                    "parameters": [
                        {"name": "Device On", "value": 1, "max": 1, "is_quantized": true, "value_items": ["Off", "On"]},
                        {"name": "Macro 1", "max": 127},
                        {"name": "Macro 2", "max": 127}
                    ],
                    "rack": {},
                    "drum_rack": {"pads": [
                        {"note": 36, "name": "Kick", "chain_count": 1},
                        {"note": 38, "name": "Snare", "chain_count": 1},
                        {"note": 39, "name": ""}
                    ]}
                }
            ]
        },
        {
            "name": "Lead",
            "armed": true,
            "has_midi_input": true,
            "devices": [
                {
                    "name": "Wavetable",
                    "class_name": "InstrumentVector",
                    "class_display_name": "Wavetable Instrument",
                    "parameters": [
                        {"name": "Device On", "value": 1, "max": 1, "is_quantized": true, "value_items": ["Off", "On"]},
                        {"name": "Filter 1 Freq", "value": 40, "min": 20, "max": 135,
                         "display": {"kind": "number", "unit": "Hz", "decimals": 0}},
                        {"name": "Filter 1 Type", "max": 4, "is_quantized": true,
                         "value_items": ["Lowpass", "Highpass", "Bandpass", "Notch", "Morph"]},
                        {"name": "LFO 1 Rate", "max": 3, "display": {"kind": "table",
                         "labels": ["1/16", "1/8", "1/8 T", "1/4"]}},
                        {"name": "Volume", "value": 0.5}
                    ]
                },
                {
                    "name": "Echo",
                    "class_name": "Echo",
                    "class_display_name": "Echo",
                    "parameters": [
                        {"name": "Feedback", "value": 0.5},
                        {"name": "Feedback", "value": 0.1}
                    ]
                }
            ]
        }
    ],
    "return_tracks": [
        {
            "name": "A-Reverb",
            "devices": [
                {"name": "Reverb", "class_name": "Reverb",
                 "parameters": [{"name": "Decay Time", "value": 2, "min": 0.2, "max": 60,
                                 "display": {"kind": "number", "unit": "s", "decimals": 1}}]}
            ]
        }
    ],
    "master": {"name": "Master", "volume": 0.85},
    "transport": {"tempo": 124, "song_length": 256},
    "grooves": [{"name": "Swing 16ths 56"}]
}"#;

pub fn song() -> MemorySong {
    MemorySong::from_json(FIXTURE).expect("fixture parses")
}

pub fn command(json: &str) -> Command {
    serde_json::from_str(json).expect("command parses")
}

pub fn run(song: &mut MemorySong, json: &str) -> Value {
    try_run(song, json).unwrap_or_else(|e| panic!("{} failed: {}", json, e))
}

pub fn try_run(song: &mut MemorySong, json: &str) -> Result<Value, CommandError> {
    dispatch_command(&command(json), song, &Config::default())
}
