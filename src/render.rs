use crate::collectors::{SystemSnapshot, ToolchainEntry};
use crate::config::{ColorsConfig, Config, Layout};
use crate::style::{Hue, Styler};

const DASHBOARD_TITLE: &str = "🌟 SYSTEM INFORMATION DASHBOARD 🌟";
const TOOLCHAINS_TITLE: &str = "🚀 INSTALLED PROGRAMMING LANGUAGES";
const TABLE_HEADER: [&str; 3] = ["Icon", "Language", "Version"];
const COLUMN_GAP: &str = "  ";

struct Metric {
    icon: &'static str,
    label: &'static str,
    hue: Hue,
    value: fn(&SystemSnapshot) -> String,
}

const METRICS: &[Metric] = &[
    Metric {
        icon: "🖥",
        label: "Platform",
        hue: Hue::Red,
        value: platform_value,
    },
    Metric {
        icon: "🧊",
        label: "Kernel",
        hue: Hue::Blue,
        value: kernel_value,
    },
    Metric {
        icon: "🏠",
        label: "Hostname",
        hue: Hue::Yellow,
        value: hostname_value,
    },
    Metric {
        icon: "🧠",
        label: "CPU",
        hue: Hue::Green,
        value: cpu_value,
    },
    Metric {
        icon: "💾",
        label: "Memory",
        hue: Hue::Magenta,
        value: memory_value,
    },
    Metric {
        icon: "📂",
        label: "Disk",
        hue: Hue::Cyan,
        value: disk_value,
    },
    Metric {
        icon: "⏳",
        label: "Uptime",
        hue: Hue::White,
        value: uptime_value,
    },
    Metric {
        icon: "🌐",
        label: "Network",
        hue: Hue::Yellow,
        value: network_value,
    },
];

fn platform_value(s: &SystemSnapshot) -> String {
    s.platform.clone()
}

fn kernel_value(s: &SystemSnapshot) -> String {
    s.kernel.clone()
}

fn hostname_value(s: &SystemSnapshot) -> String {
    s.hostname.clone()
}

fn cpu_value(s: &SystemSnapshot) -> String {
    format!("{} ({} cores)", s.cpu_model, s.cpu_core_count)
}

fn memory_value(s: &SystemSnapshot) -> String {
    format!("{:.2} GB", s.memory_total_gb)
}

fn disk_value(s: &SystemSnapshot) -> String {
    format!("{:.2} GB", s.disk_total_gb)
}

fn uptime_value(s: &SystemSnapshot) -> String {
    format!("{:.2} hours", s.uptime_hours)
}

fn network_value(s: &SystemSnapshot) -> String {
    format!(
        "↑ {:.2} MB sent | ↓ {:.2} MB received",
        s.network_sent_mb, s.network_recv_mb
    )
}

/// Spaces needed to bring `text` up to `total_width` code points. Empty when
/// the text is already that wide or wider.
pub fn get_padding(text: &str, total_width: usize) -> String {
    let width = text.chars().count();
    " ".repeat(total_width.saturating_sub(width))
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: Hue,
    pub label: Hue,
}

impl Theme {
    pub fn from_config(cfg: &ColorsConfig) -> Self {
        Self {
            title: Hue::from_name(&cfg.title),
            label: Hue::from_name(&cfg.label),
        }
    }
}

/// A rendered line kept twice: plain text for width math and the styled form
/// that is actually printed.
struct Line {
    plain: String,
    styled: String,
}

pub struct Renderer {
    layout: Layout,
    width: usize,
    styler: Styler,
    theme: Theme,
}

impl Renderer {
    pub fn new(layout: Layout, width: usize, styler: Styler, theme: Theme) -> Self {
        Self {
            layout,
            width,
            styler,
            theme,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.layout,
            cfg.width,
            Styler::new(cfg.colors.enabled),
            Theme::from_config(&cfg.colors),
        )
    }

    pub fn render(&self, snapshot: &SystemSnapshot, toolchains: &[ToolchainEntry]) -> String {
        let metrics: Vec<Line> = METRICS.iter().map(|m| self.metric_line(m, snapshot)).collect();
        let table = self.toolchain_table(toolchains);

        let mut out = match self.layout {
            Layout::Boxed => self.boxed(metrics, table),
            Layout::Plain => self.plain(metrics, table),
        }
        .join("\n");
        out.push('\n');
        out
    }

    fn boxed(&self, metrics: Vec<Line>, table: Vec<Line>) -> Vec<String> {
        let dashboard = self.title_line(DASHBOARD_TITLE);
        let toolchains = self.title_line(TOOLCHAINS_TITLE);
        let width = box_width(
            self.width,
            metrics
                .iter()
                .chain(&table)
                .chain([&dashboard, &toolchains]),
        );

        let mut out = Vec::with_capacity(metrics.len() + table.len() + 7);
        out.push(self.border('╔', '╗', width));
        out.push(self.boxed_row(&dashboard, width));
        out.push(self.border('╠', '╣', width));
        out.extend(metrics.iter().map(|line| self.boxed_row(line, width)));
        out.push(self.border('╠', '╣', width));
        out.push(self.boxed_row(&toolchains, width));
        out.push(self.border('╠', '╣', width));
        out.extend(table.iter().map(|line| self.boxed_row(line, width)));
        out.push(self.border('╚', '╝', width));
        out
    }

    fn plain(&self, metrics: Vec<Line>, table: Vec<Line>) -> Vec<String> {
        let mut out = Vec::with_capacity(metrics.len() + table.len() + 3);
        out.push(self.title_line(DASHBOARD_TITLE).styled);
        out.extend(metrics.into_iter().map(|line| line.styled));
        out.push(String::new());
        out.push(self.title_line(TOOLCHAINS_TITLE).styled);
        out.extend(table.into_iter().map(|line| line.styled));
        out
    }

    fn border(&self, left: char, right: char, width: usize) -> String {
        let line = format!("{left}{}{right}", "═".repeat(width));
        self.styler.paint(&line, self.theme.title)
    }

    fn boxed_row(&self, line: &Line, width: usize) -> String {
        let bar = self.styler.paint("║", self.theme.title);
        let pad = get_padding(&format!(" {}", line.plain), width);
        format!("{bar} {}{pad}{bar}", line.styled)
    }

    fn title_line(&self, title: &str) -> Line {
        Line {
            plain: title.to_string(),
            styled: self.styler.paint_bold(title, self.theme.title),
        }
    }

    fn metric_line(&self, metric: &Metric, snapshot: &SystemSnapshot) -> Line {
        let value = (metric.value)(snapshot);
        Line {
            plain: format!("{} {}: {}", metric.icon, metric.label, value),
            styled: format!(
                "{} {}: {}",
                metric.icon,
                self.styler.paint_bold(metric.label, self.theme.label),
                self.styler.paint(&value, metric.hue)
            ),
        }
    }

    fn toolchain_table(&self, toolchains: &[ToolchainEntry]) -> Vec<Line> {
        let rows: Vec<[&str; 3]> = toolchains
            .iter()
            .map(|t| [t.icon.as_str(), t.name.as_str(), t.version.as_str()])
            .collect();

        let mut widths = TABLE_HEADER.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = table_row(&TABLE_HEADER, &widths);
        let mut lines = vec![Line {
            styled: self.styler.paint_bold(&header, self.theme.label),
            plain: header,
        }];

        if rows.is_empty() {
            lines.push(Line {
                plain: "none detected".to_string(),
                styled: "none detected".to_string(),
            });
        }
        lines.extend(rows.iter().map(|row| {
            let text = table_row(row, &widths);
            Line {
                plain: text.clone(),
                styled: text,
            }
        }));
        lines
    }
}

/// Inner box width: the configured width, grown to fit the widest row plus
/// its leading space.
fn box_width<'a>(min_width: usize, lines: impl Iterator<Item = &'a Line>) -> usize {
    lines
        .map(|line| line.plain.chars().count() + 1)
        .fold(min_width, usize::max)
}

/// Left-aligned cells; the last column is not padded.
fn table_row(cells: &[&str; 3], widths: &[usize; 3]) -> String {
    let mut out = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        out.push_str(cell);
        if i + 1 < cells.len() {
            out.push_str(&get_padding(cell, *width));
            out.push_str(COLUMN_GAP);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SystemSnapshot {
        SystemSnapshot {
            platform: "Ubuntu 22.04".to_string(),
            kernel: "6.5.0-generic".to_string(),
            hostname: "devbox".to_string(),
            cpu_model: "AMD Ryzen 7 5800X".to_string(),
            cpu_core_count: 16,
            memory_total_gb: 1.0,
            disk_total_gb: 0.0,
            uptime_hours: 1.5,
            network_sent_mb: 10.0,
            network_recv_mb: 25.5,
        }
    }

    fn toolchains() -> Vec<ToolchainEntry> {
        vec![
            ToolchainEntry {
                name: "Python".to_string(),
                icon: "🐍".to_string(),
                version: "3.11.4".to_string(),
            },
            ToolchainEntry {
                name: "Node.js".to_string(),
                icon: "🟨".to_string(),
                version: "18.16.0".to_string(),
            },
        ]
    }

    fn renderer(layout: Layout, colors: bool) -> Renderer {
        Renderer::new(
            layout,
            60,
            Styler::new(colors),
            Theme {
                title: Hue::Magenta,
                label: Hue::Cyan,
            },
        )
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn padding_never_goes_negative() {
        assert_eq!(get_padding("abc", 5), "  ");
        assert_eq!(get_padding("abcde", 5), "");
        assert_eq!(get_padding("abcdefg", 5), "");
        assert_eq!(get_padding("", 0), "");
    }

    #[test]
    fn padding_counts_code_points_not_bytes() {
        assert_eq!(get_padding("🐍 ok", 6), "  ");
        assert_eq!(get_padding("↑↓", 2), "");
    }

    #[test]
    fn every_metric_rendered_once() {
        for layout in [Layout::Boxed, Layout::Plain] {
            let out = renderer(layout, false).render(&snapshot(), &toolchains());
            for metric in METRICS {
                let prefix = format!("{} {}:", metric.icon, metric.label);
                assert_eq!(
                    out.matches(&prefix).count(),
                    1,
                    "метрика {} в {:?}",
                    metric.label,
                    layout
                );
            }
        }
    }

    #[test]
    fn numeric_values_have_two_decimals_and_units() {
        let out = renderer(Layout::Plain, false).render(&snapshot(), &[]);
        assert!(out.contains("💾 Memory: 1.00 GB"));
        assert!(out.contains("📂 Disk: 0.00 GB"));
        assert!(out.contains("⏳ Uptime: 1.50 hours"));
        assert!(out.contains("🌐 Network: ↑ 10.00 MB sent | ↓ 25.50 MB received"));
        assert!(out.contains("🧠 CPU: AMD Ryzen 7 5800X (16 cores)"));
    }

    #[test]
    fn boxed_lines_share_one_width() {
        let out = renderer(Layout::Boxed, false).render(&snapshot(), &toolchains());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), METRICS.len() + 3 + 7);
        for line in lines {
            assert_eq!(line.chars().count(), 62, "строка: {line}");
        }
    }

    #[test]
    fn boxed_grows_to_fit_long_rows() {
        let mut host = snapshot();
        host.cpu_model = "11th Gen Intel(R) Core(TM) i7-1165G7 @ 2.80GHz".to_string();
        host.cpu_core_count = 8;
        host.network_sent_mb = 1234.5;
        host.network_recv_mb = 98765.4;

        let out = Renderer::from_config(&Config {
            colors: ColorsConfig {
                enabled: false,
                ..ColorsConfig::default()
            },
            ..Config::default()
        })
        .render(&host, &toolchains());

        let cpu_row = "🧠 CPU: 11th Gen Intel(R) Core(TM) i7-1165G7 @ 2.80GHz (8 cores)";
        let expected = cpu_row.chars().count() + 3;
        assert!(expected > Config::default().width + 2);
        for line in out.lines() {
            assert_eq!(line.chars().count(), expected, "строка: {line}");
        }
        assert!(out.contains(&format!("║ {cpu_row}║")));
    }

    #[test]
    fn every_icon_counts_as_one_code_point() {
        for metric in METRICS {
            assert_eq!(metric.icon.chars().count(), 1, "иконка {}", metric.label);
        }
    }

    #[test]
    fn toolchain_table_lists_rows_under_header() {
        let out = renderer(Layout::Plain, false).render(&snapshot(), &toolchains());
        let lines: Vec<&str> = out.lines().collect();
        let header = lines
            .iter()
            .position(|l| l.starts_with("Icon"))
            .expect("заголовок таблицы");
        assert_eq!(lines[header], "Icon  Language  Version");
        assert_eq!(lines[header + 1], "🐍     Python    3.11.4");
        assert_eq!(lines[header + 2], "🟨     Node.js   18.16.0");
    }

    #[test]
    fn empty_toolchain_list_renders_placeholder() {
        let out = renderer(Layout::Plain, false).render(&snapshot(), &[]);
        assert!(out.contains("none detected"));
        assert!(!out.contains("Python"));
    }

    #[test]
    fn disabled_styling_keeps_text_without_escapes() {
        colored::control::set_override(true);
        for layout in [Layout::Boxed, Layout::Plain] {
            let plain = renderer(layout, false).render(&snapshot(), &toolchains());
            let styled = renderer(layout, true).render(&snapshot(), &toolchains());

            assert!(!plain.contains('\x1b'));
            assert!(styled.contains('\x1b'));
            assert_eq!(strip_ansi(&styled), plain);
        }
    }
}
