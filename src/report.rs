use crate::collectors::system::collect_system;
use crate::collectors::toolchains::{detect_toolchains, CommandRunner};
use crate::collectors::{CollectionError, HostSource, SystemSnapshot, ToolchainEntry};
use crate::config::Config;
use crate::render::Renderer;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    pub collected_at: String,
    pub system: SystemSnapshot,
    pub toolchains: Vec<ToolchainEntry>,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("ошибка сбора системной информации: {0}")]
    Collection(#[from] CollectionError),
    #[error("не удалось вывести отчёт: {0}")]
    Io(#[from] std::io::Error),
    #[error("не удалось сериализовать отчёт: {0}")]
    Json(#[from] serde_json::Error),
}

/// Collects host facts, then probes toolchains. Toolchains are only probed
/// once the snapshot is complete.
pub async fn gather<S: HostSource, R: CommandRunner>(
    source: &mut S,
    runner: &R,
    cfg: &Config,
) -> Result<Report, CollectionError> {
    let system = collect_system(source, Path::new(&cfg.disk_path))?;
    let toolchains = detect_toolchains(runner, &cfg.toolchains, cfg.probe_timeout()).await;
    debug!(toolchains = toolchains.len(), "тулчейны определены");

    Ok(Report {
        collected_at: humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
        system,
        toolchains,
    })
}

/// Writes the whole report or nothing: `out` is untouched when collection
/// fails.
pub async fn write_report<S, R, W>(
    source: &mut S,
    runner: &R,
    cfg: &Config,
    format: Format,
    out: &mut W,
) -> Result<(), ReportError>
where
    S: HostSource,
    R: CommandRunner,
    W: Write,
{
    let report = gather(source, runner, cfg).await?;
    match format {
        Format::Text => {
            let text = Renderer::from_config(cfg).render(&report.system, &report.toolchains);
            out.write_all(text.as_bytes())?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
