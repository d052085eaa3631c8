//! Replays JSON-lines commands against a host fixture.
//!
//! ```text
//! remora [--verbose] [--config PATH] [--save PATH] <fixture.json> [commands.jsonl]
//! ```
//!
//! Each input line is one command (`{"type": ..., "params": {...}}`); each
//! output line is `{"status": "success", "result": ...}` or
//! `{"status": "error", "kind": ..., "message": ...}`. Commands are read from
//! stdin when no commands file is given.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::{json, Value};

use remora_core::host::memory::MemorySong;
use remora_core::{Config, LocalDispatcher};
use remora_types::{Command, Dispatcher};

fn init_logging(level: log::LevelFilter) {
    use simplelog::*;

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("remora")
        .join("remora.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create(std::env::temp_dir().join("remora.log"))) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("remora: logging disabled, cannot create log file: {}", e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), log_file) {
        eprintln!("remora: logging disabled: {}", e);
        return;
    }

    log::info!("remora starting (log level: {:?})", level);
}

struct Args {
    verbose: bool,
    config: Option<PathBuf>,
    save: Option<PathBuf>,
    fixture: PathBuf,
    commands: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut verbose = false;
    let mut config: Option<PathBuf> = None;
    let mut save: Option<PathBuf> = None;
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--config" => config = Some(iter.next().ok_or("--config needs a path")?.into()),
            "--save" => save = Some(iter.next().ok_or("--save needs a path")?.into()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            path => positional.push(PathBuf::from(path)),
        }
    }
    let mut positional = positional.into_iter();
    let fixture = positional.next().ok_or("missing fixture path")?;
    let commands = positional.next();
    if positional.next().is_some() {
        return Err("too many arguments".into());
    }
    Ok(Args { verbose, config, save, fixture, commands })
}

/// Response line for one input line.
fn reply(dispatcher: &mut LocalDispatcher<'_>, line: &str) -> Value {
    let command: Command = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => {
            log::warn!(target: "cli", "undecodable command: {}", e);
            return json!({"status": "error", "kind": "decode", "message": e.to_string()});
        }
    };
    match dispatcher.dispatch(&command) {
        Ok(result) => json!({"status": "success", "result": result}),
        Err(e) => json!({"status": "error", "kind": e.kind().as_str(), "message": e.to_string()}),
    }
}

/// Dispatch every non-blank input line in order. Returns the number of failed commands.
fn replay(song: &mut MemorySong, config: &Config, input: impl BufRead, mut output: impl Write) -> io::Result<usize> {
    let mut dispatcher = LocalDispatcher::new(song, config);
    let mut failures = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = reply(&mut dispatcher, &line);
        if response["status"] == "error" {
            failures += 1;
        }
        writeln!(output, "{}", response)?;
    }
    Ok(failures)
}

fn load_fixture(path: &Path) -> Result<MemorySong, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    MemorySong::from_json(&text).map_err(|e| format!("invalid fixture {}: {}", path.display(), e))
}

fn run(args: Args) -> Result<usize, String> {
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    init_logging(if args.verbose { log::LevelFilter::Debug } else { config.log_level() });

    let mut song = load_fixture(&args.fixture)?;
    let stdout = io::stdout();
    let failures = match &args.commands {
        Some(path) => {
            let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
            replay(&mut song, &config, BufReader::new(file), stdout.lock())
        }
        None => replay(&mut song, &config, io::stdin().lock(), stdout.lock()),
    }
    .map_err(|e| e.to_string())?;

    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&song).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    }
    Ok(failures)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("remora: {}", e);
            eprintln!("usage: remora [--verbose] [--config PATH] [--save PATH] <fixture.json> [commands.jsonl]");
            return ExitCode::from(2);
        }
    };
    match run(args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::info!("{} command(s) failed", failures);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("remora: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{"tracks": [{"name": "Bass", "devices": [{"name": "Auto Filter",
        "class_name": "AutoFilter", "parameters": [
            {"name": "Filter Type", "max": 2, "is_quantized": true, "value_items": ["Lowpass", "Highpass", "Bandpass"]}
        ]}]}]}"#;

    fn replay_str(input: &str) -> (Vec<Value>, usize, MemorySong) {
        let mut song = MemorySong::from_json(FIXTURE).unwrap();
        let mut out = Vec::new();
        let failures = replay(&mut song, &Config::default(), input.as_bytes(), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (lines, failures, song)
    }

    #[test]
    fn replays_each_line_in_order() {
        let input = concat!(
            r#"{"type": "set_device_parameter", "params": {"track_index": 0, "device_index": 0, "parameter_name": "Filter Type", "value_display": "highpass"}}"#,
            "\n\n",
            r#"{"type": "get_device_parameters", "params": {"track_index": 0, "device_index": 0}}"#,
            "\n",
        );
        let (lines, failures, song) = replay_str(input);
        assert_eq!(failures, 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["result"]["value"], 1.0);
        assert_eq!(lines[1]["result"]["parameters"][0]["display_value"], "Highpass");
        assert_eq!(song.tracks[0].devices[0].parameters[0].value, 1.0);
    }

    #[test]
    fn errors_do_not_stop_replay() {
        let input = "not json\n{\"type\": \"get_device_info\", \"params\": {\"track_index\": 3, \"device_index\": 0}}\n{\"type\": \"tap_tempo\"}\n";
        let (lines, failures, _) = replay_str(input);
        assert_eq!(failures, 2);
        assert_eq!(lines[0]["kind"], "decode");
        assert_eq!(lines[1]["kind"], "addressing");
        assert_eq!(lines[2]["status"], "success");
    }

    #[test]
    fn parses_flags_and_paths() {
        let args: Vec<String> = ["-v", "--save", "out.json", "song.json", "cmds.jsonl"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let parsed = parse_args(&args).unwrap();
        assert!(parsed.verbose);
        assert_eq!(parsed.save, Some(PathBuf::from("out.json")));
        assert_eq!(parsed.fixture, PathBuf::from("song.json"));
        assert_eq!(parsed.commands, Some(PathBuf::from("cmds.jsonl")));

        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&["--bogus".to_string(), "a".to_string()]).is_err());
    }

    #[test]
    fn fixture_round_trips_through_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.json");
        let song = MemorySong::from_json(FIXTURE).unwrap();
        std::fs::write(&path, serde_json::to_string(&song).unwrap()).unwrap();
        assert_eq!(load_fixture(&path).unwrap(), song);
        assert!(load_fixture(&dir.path().join("missing.json")).is_err());
    }
}
