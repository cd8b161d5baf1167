//! 型定義

pub mod monitor;

pub use monitor::{Monitor, MonitorPatch, MonitorStatus, NewMonitor, ProbeResult};
