pub mod system;
pub mod toolchains;

use std::path::Path;
use thiserror::Error;

pub const BYTES_PER_GB: f64 = (1_u64 << 30) as f64;
pub const BYTES_PER_MB: f64 = (1_u64 << 20) as f64;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SystemSnapshot {
    pub platform: String,
    pub kernel: String,
    pub hostname: String,
    pub cpu_model: String,
    pub cpu_core_count: u32,
    pub memory_total_gb: f64,
    pub disk_total_gb: f64,
    pub uptime_hours: f64,
    pub network_sent_mb: f64,
    pub network_recv_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ToolchainEntry {
    pub name: String,
    pub icon: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct HostIdentity {
    pub os_name: String,
    pub os_version: Option<String>,
    pub kernel_version: String,
    pub hostname: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct CpuInfo {
    pub model: String,
    pub logical_cores: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("не удалось определить {field} хоста")]
    Host { field: &'static str },
    #[error("не удалось получить сведения о CPU")]
    Cpu,
    #[error("не удалось получить объём памяти")]
    Memory,
    #[error("не найден диск для пути {path}")]
    Disk { path: String },
    #[error("не удалось получить счётчики сети")]
    Network,
}

/// Source of raw host facts. Every query may fail on its own; callers get the
/// first failure and no partial data.
pub trait HostSource {
    fn host(&mut self) -> Result<HostIdentity, CollectionError>;
    fn cpu(&mut self) -> Result<CpuInfo, CollectionError>;
    fn memory_total_bytes(&mut self) -> Result<u64, CollectionError>;
    fn disk_total_bytes(&mut self, path: &Path) -> Result<u64, CollectionError>;
    fn network_counters(&mut self) -> Result<NetCounters, CollectionError>;
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

pub fn seconds_to_hours(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR
}
