use crate::collectors::{
    bytes_to_gb, bytes_to_mb, seconds_to_hours, CollectionError, CpuInfo, HostIdentity,
    HostSource, NetCounters, SystemSnapshot,
};
use std::path::Path;
use sysinfo::{CpuExt, DiskExt, NetworkExt, NetworksExt, System, SystemExt};
use tracing::debug;

/// Collects one snapshot. The first failing sub-query aborts the whole
/// collection.
pub fn collect_system<S: HostSource>(
    source: &mut S,
    disk_path: &Path,
) -> Result<SystemSnapshot, CollectionError> {
    let host = source.host()?;
    let cpu = source.cpu()?;
    let memory_total_bytes = source.memory_total_bytes()?;
    let disk_total_bytes = source.disk_total_bytes(disk_path)?;
    let net = source.network_counters()?;

    let platform = match host
        .os_version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        Some(version) => format!("{} {}", host.os_name, version),
        None => host.os_name.clone(),
    };

    let snapshot = SystemSnapshot {
        platform,
        kernel: host.kernel_version,
        hostname: host.hostname,
        cpu_model: cpu.model,
        cpu_core_count: cpu.logical_cores,
        memory_total_gb: bytes_to_gb(memory_total_bytes),
        disk_total_gb: bytes_to_gb(disk_total_bytes),
        uptime_hours: seconds_to_hours(host.uptime_seconds),
        network_sent_mb: bytes_to_mb(net.bytes_sent),
        network_recv_mb: bytes_to_mb(net.bytes_recv),
    };
    debug!(
        hostname = %snapshot.hostname,
        cores = snapshot.cpu_core_count,
        disk_path = %disk_path.display(),
        "снимок системы собран"
    );
    Ok(snapshot)
}

pub struct SysinfoSource {
    system: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSource for SysinfoSource {
    fn host(&mut self) -> Result<HostIdentity, CollectionError> {
        let os_name = non_empty(self.system.name()).ok_or(CollectionError::Host {
            field: "платформу",
        })?;
        let kernel_version =
            non_empty(self.system.kernel_version()).ok_or(CollectionError::Host {
                field: "версию ядра",
            })?;
        let hostname = non_empty(self.system.host_name()).ok_or(CollectionError::Host {
            field: "имя",
        })?;

        Ok(HostIdentity {
            os_name,
            os_version: self.system.os_version(),
            kernel_version,
            hostname,
            uptime_seconds: self.system.uptime(),
        })
    }

    fn cpu(&mut self) -> Result<CpuInfo, CollectionError> {
        self.system.refresh_cpu();
        let cpus = self.system.cpus();
        let model = cpus
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|b| !b.is_empty())
            .ok_or(CollectionError::Cpu)?;

        Ok(CpuInfo {
            model,
            logical_cores: cpus.len() as u32,
        })
    }

    fn memory_total_bytes(&mut self) -> Result<u64, CollectionError> {
        self.system.refresh_memory();
        match self.system.total_memory() {
            0 => Err(CollectionError::Memory),
            total => Ok(total),
        }
    }

    fn disk_total_bytes(&mut self, path: &Path) -> Result<u64, CollectionError> {
        self.system.refresh_disks_list();
        let disks = self
            .system
            .disks()
            .iter()
            .map(|d| (d.mount_point(), d.total_space()));
        select_mount(disks, path).ok_or_else(|| CollectionError::Disk {
            path: path.display().to_string(),
        })
    }

    fn network_counters(&mut self) -> Result<NetCounters, CollectionError> {
        self.system.refresh_networks_list();
        self.system.refresh_networks();
        let counters = self
            .system
            .networks()
            .iter()
            .map(|(_, data)| NetCounters {
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
            });
        aggregate_counters(counters).ok_or(CollectionError::Network)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Picks the disk whose mount point is the longest prefix of `path`.
fn select_mount<'a>(disks: impl Iterator<Item = (&'a Path, u64)>, path: &Path) -> Option<u64> {
    disks
        .filter(|(mount, _)| path.starts_with(mount))
        .max_by_key(|(mount, _)| mount.as_os_str().len())
        .map(|(_, total)| total)
}

fn aggregate_counters(counters: impl Iterator<Item = NetCounters>) -> Option<NetCounters> {
    counters.fold(None, |acc, c| {
        let base = acc.unwrap_or(NetCounters {
            bytes_sent: 0,
            bytes_recv: 0,
        });
        Some(NetCounters {
            bytes_sent: base.bytes_sent.saturating_add(c.bytes_sent),
            bytes_recv: base.bytes_recv.saturating_add(c.bytes_recv),
        })
    })
}
