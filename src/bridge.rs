//! Device bridge (adb) access and the raw SMS fetch.
//!
//! Uses `adb shell content query` to read the device's SMS content provider.
//!
//! CHANGELOG:
//! - 03/02/2026 - Serial selection (`adb -s`), unauthorized device diagnostics
//! - 02/02/2026 - Initial implementation

use std::process::{Command, Output};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ExportError, Result};
use crate::message::Message;
use crate::record::parse_line;

/// Content provider URI for the device's SMS store.
pub const SMS_CONTENT_URI: &str = "content://sms/";

/// Connection state reported by `adb devices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Device,
    Unauthorized,
    Offline,
    Other(String),
}

impl DeviceState {
    fn parse(state: &str) -> Self {
        match state {
            "device" => DeviceState::Device,
            "unauthorized" => DeviceState::Unauthorized,
            "offline" => DeviceState::Offline,
            other => DeviceState::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub serial: String,
    pub state: DeviceState,
}

/// The external bridge, as seen by [`fetch`].
pub trait Bridge {
    /// Confirm the bridge can be invoked.
    fn version(&self) -> Result<String>;

    /// List attached devices.
    fn devices(&self) -> Result<Vec<Device>>;

    /// Raw stdout of the SMS content query.
    fn query_sms(&self) -> Result<String>;

    /// Device the bridge is pinned to, if any.
    fn serial(&self) -> Option<&str> {
        None
    }
}

/// Outcome of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Messages(Vec<Message>),
    /// No inbound messages; nothing to display or export.
    Empty,
}

impl Fetched {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            Fetched::Messages(messages) => messages,
            Fetched::Empty => Vec::new(),
        }
    }
}

/// `adb` on the PATH (or a configured executable).
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: String,
    serial: Option<String>,
}

impl AdbBridge {
    pub fn new(program: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            serial,
        }
    }

    fn run(&self, args: &[&str], pinned: bool) -> Result<Output> {
        let mut cmd = Command::new(&self.program);
        if pinned {
            if let Some(ref serial) = self.serial {
                cmd.arg("-s").arg(serial);
            }
        }
        cmd.args(args);
        tracing::debug!(program = %self.program, ?args, "invoking device bridge");

        cmd.output().map_err(|e| ExportError::ToolUnavailable {
            program: self.program.clone(),
            reason: e.to_string(),
        })
    }
}

impl Bridge for AdbBridge {
    fn version(&self) -> Result<String> {
        let output = self.run(&["version"], false)?;
        if !output.status.success() {
            return Err(ExportError::ToolUnavailable {
                program: self.program.clone(),
                reason: format!("`version` exited with {}", output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn devices(&self) -> Result<Vec<Device>> {
        let output = self.run(&["devices"], false)?;
        if !output.status.success() {
            return Err(ExportError::CommandFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(parse_devices(&String::from_utf8_lossy(&output.stdout)))
    }

    fn query_sms(&self) -> Result<String> {
        let output = self.run(
            &["shell", "content", "query", "--uri", SMS_CONTENT_URI],
            true,
        )?;
        if !output.status.success() {
            return Err(ExportError::CommandFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }
}

fn device_line() -> &'static Regex {
    static DEVICE_LINE: OnceLock<Regex> = OnceLock::new();
    DEVICE_LINE.get_or_init(|| Regex::new(r"^(\S+)\s+(\S+)").expect("valid device line regex"))
}

/// Parse `adb devices` output, skipping the header and daemon notices.
pub fn parse_devices(text: &str) -> Vec<Device> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(|line| device_line().captures(line))
        .map(|caps| Device {
            serial: caps[1].to_string(),
            state: DeviceState::parse(&caps[2]),
        })
        .collect()
}

/// Require a usable device, or the pinned one when a serial is set.
fn ensure_device(devices: &[Device], serial: Option<&str>) -> Result<()> {
    for device in devices.iter().filter(|d| d.state != DeviceState::Device) {
        tracing::warn!(serial = %device.serial, state = ?device.state, "ignoring unusable device");
    }

    let mut ready = devices.iter().filter(|d| d.state == DeviceState::Device);
    match serial {
        Some(serial) => {
            if ready.any(|d| d.serial == serial) {
                Ok(())
            } else {
                Err(ExportError::DeviceNotFound {
                    serial: serial.to_string(),
                })
            }
        }
        None => {
            if ready.next().is_some() {
                Ok(())
            } else {
                Err(ExportError::NoDeviceConnected)
            }
        }
    }
}

/// Project inbound messages from raw output, stopping after `max_count`.
pub fn collect_inbound(stdout: &str, max_count: Option<usize>) -> Vec<Message> {
    let mut messages = Vec::new();
    if max_count == Some(0) {
        return messages;
    }

    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        if let Some(message) = Message::from_record(&parse_line(line)) {
            messages.push(message);
            if max_count.is_some_and(|max| messages.len() >= max) {
                break;
            }
        }
    }
    messages
}

/// Fetch inbound messages from the device.
///
/// `max_count` caps the number of accepted messages; `None` reads everything.
pub fn fetch(bridge: &dyn Bridge, max_count: Option<usize>) -> Result<Fetched> {
    let version = bridge.version()?;
    tracing::debug!(%version, "device bridge available");

    let devices = bridge.devices()?;
    ensure_device(&devices, bridge.serial())?;

    let stdout = bridge.query_sms()?;
    let messages = collect_inbound(&stdout, max_count);
    tracing::debug!(count = messages.len(), ?max_count, "collected inbound messages");

    if messages.is_empty() {
        Ok(Fetched::Empty)
    } else {
        Ok(Fetched::Messages(messages))
    }
}
