//! End-to-end fetch → export runs against a scripted bridge.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use sms_export::bridge::{parse_devices, Device};
use sms_export::commands::batch;
use sms_export::config::Config;
use sms_export::error::Result;
use sms_export::format::{from_interchange, local_time, to_interchange};
use sms_export::message::project;
use sms_export::record::parse_output;
use sms_export::{shell, Bridge, ExportError};
use tempfile::TempDir;

struct ScriptedBridge {
    devices: &'static str,
    stdout: &'static str,
}

impl Bridge for ScriptedBridge {
    fn version(&self) -> Result<String> {
        Ok("Android Debug Bridge version 1.0.41".to_string())
    }

    fn devices(&self) -> Result<Vec<Device>> {
        Ok(parse_devices(self.devices))
    }

    fn query_sms(&self) -> Result<String> {
        Ok(self.stdout.to_string())
    }
}

const ATTACHED: &str = "List of devices attached\nR58M123ABC\tdevice\n";

const QUERY_OUTPUT: &str = "\
Row: 0 _id=3, address=+821011112222, date=1700000000000, body=hello, type=1
Row: 1 _id=2, address=+821099998888, date=1700000500000, body=outgoing, type=2
Row: 2 _id=1, address=15881234, date=1699999000000, body=code=ABC==, type=1
";

fn config_in(dir: &TempDir) -> Config {
    Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

fn csv_files(dir: &TempDir) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();
    files
}

#[test]
fn batch_exports_inbound_newest_first() {
    let dir = TempDir::new().unwrap();
    let bridge = ScriptedBridge {
        devices: ATTACHED,
        stdout: QUERY_OUTPUT,
    };

    batch::run_with(&bridge, &config_in(&dir)).unwrap();

    let files = csv_files(&dir);
    assert_eq!(files.len(), 1);

    let expected_name = local_time(1_700_000_000_000)
        .unwrap()
        .format("%Y%m%d_%H%M%S.csv")
        .to_string();
    assert_eq!(files[0].file_name().unwrap().to_string_lossy(), expected_name);

    let content = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(
        content,
        "전화번호,시간,내용\n\
         01011112222,1700000000000,hello\n\
         15881234,1699999000000,code=ABC==\n"
    );
}

#[test]
fn batch_with_no_inbound_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let bridge = ScriptedBridge {
        devices: ATTACHED,
        stdout: "Row: 0 address=1, date=1, body=sent, type=2\n",
    };

    batch::run_with(&bridge, &config_in(&dir)).unwrap();
    assert!(csv_files(&dir).is_empty());
}

#[test]
fn batch_without_device_fails() {
    let dir = TempDir::new().unwrap();
    let bridge = ScriptedBridge {
        devices: "List of devices attached\n\n",
        stdout: QUERY_OUTPUT,
    };

    let err = batch::run_with(&bridge, &config_in(&dir)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::NoDeviceConnected)
    ));
    assert!(csv_files(&dir).is_empty());
}

#[test]
fn interchange_round_trip_preserves_triples() {
    let messages = project(&parse_output(QUERY_OUTPUT));
    assert_eq!(messages.len(), 2);

    let restored = from_interchange(&to_interchange(&messages).unwrap()).unwrap();
    assert_eq!(restored, messages);
}

#[test]
fn shell_fetch_then_export() {
    let dir = TempDir::new().unwrap();
    let bridge = ScriptedBridge {
        devices: ATTACHED,
        stdout: QUERY_OUTPUT,
    };
    let input = Cursor::new("count 1\nfetch\nbogus\nexport\nquit\n");
    let mut out = Vec::new();

    shell::run(input, &mut out, &bridge, &config_in(&dir)).unwrap();

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("max count: 1\n"));
    assert!(transcript.contains("01011112222 | "));
    assert!(!transcript.contains("15881234 | "));
    assert!(transcript.contains("Error: unknown command: bogus"));
    assert!(transcript.contains("Exported 1 messages to "));

    let files = csv_files(&dir);
    assert_eq!(files.len(), 1);
    let content = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn shell_reports_failures_and_keeps_running() {
    let dir = TempDir::new().unwrap();
    let bridge = ScriptedBridge {
        devices: "List of devices attached\nR58M123ABC\tunauthorized\n",
        stdout: QUERY_OUTPUT,
    };
    let input = Cursor::new("fetch\nexport\nhelp\n");
    let mut out = Vec::new();

    shell::run(input, &mut out, &bridge, &config_in(&dir)).unwrap();

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("Error: no authorized device connected"));
    assert!(transcript.contains("No result found."));
    assert!(transcript.contains("Commands:"));
    assert!(csv_files(&dir).is_empty());
}
