use crate::app::{App, Field};
use crate::ui::footer::render_footer;
use crate::ui::theme::Theme;
use crate::util::human::{fmt_bytes, fmt_gb, fmt_mb, fmt_pct};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const LABEL_W: usize = 26;

pub fn render(f: &mut Frame, app: &App) {
    let area  = f.area();
    let theme = &app.theme;

    // ── Root: header | body | footer ───────────────────────────────
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let left  = format!(" spaceeater v{} — {} ", env!("CARGO_PKG_VERSION"), app.theme_variant.name());
    let right = format!(" {} ", Local::now().format("%H:%M:%S"));
    let pad   = (area.width as usize).saturating_sub(left.chars().count() + right.len());
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(left, theme.title),
            Span::raw(" ".repeat(pad)),
            Span::styled(right, theme.text_dim),
        ])),
        root[0],
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(root[1]);

    render_files(f, body[0], app);
    render_eaten(f, body[1], app);
    render_disk_space(f, body[2], app);
    render_capacity(f, body[3], app);

    render_footer(f, root[2], app.flash_text(), theme);
}

fn section<'a>(title: &'a str, theme: &Theme, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { theme.border_focused } else { theme.border })
        .title(Span::styled(format!(" {} ", title), theme.title))
}

fn kv(key: &str, val: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<w$}", key, w = LABEL_W), theme.text_dim),
        Span::styled(val, theme.value),
    ])
}

// ── Files ─────────────────────────────────────────────────────────────

fn render_files(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = section("Files", theme, true);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let stepper_line = |field: Field, label: &str, val: String| {
        let is_sel = app.selected == field;
        let marker = if is_sel { "▶" } else { " " };
        let style  = if is_sel { theme.selected } else { theme.text };
        Line::from(vec![
            Span::styled(format!("{}{:<w$}", marker, label, w = LABEL_W), style),
            Span::styled(format!(" ◀ {} ▶ ", val), if is_sel { theme.selected } else { theme.value }),
        ])
    };

    let size  = app.prefs.file_size_bytes;
    let count = app.prefs.file_count;
    let per_file = crate::engine::payload::payload_len(size);

    let lines = vec![
        stepper_line(Field::FileSize,  "File Size:",       fmt_mb(size)),
        stepper_line(Field::FileCount, "Number Of Files:", count.to_string()),
        Line::from(vec![Span::styled(
            format!(" Will write {} × {} = {}", count, fmt_bytes(per_file), fmt_bytes(per_file.saturating_mul(count as u64))),
            theme.text_dim,
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" [d] ", theme.footer_key),
            Span::styled("Delete One File   ", theme.crit),
            Span::styled(" [D] ", theme.footer_key),
            Span::styled("Delete All Files   ", theme.crit),
            Span::styled(" [g] ", theme.footer_key),
            Span::styled("Generate Files", theme.ok),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

// ── Eaten ─────────────────────────────────────────────────────────────

fn render_eaten(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = section("Eaten", theme, false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let e = &app.eaten;
    let mut files = format!("{}", e.files);
    if e.skipped > 0 {
        files.push_str(&format!("  ({} unreadable, not counted)", e.skipped));
    }
    let lines = vec![
        kv("Size:", fmt_gb(e.bytes), theme),
        kv("Files:", files, theme),
        kv("Directory:", app.working_dir().display().to_string(), theme),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

// ── Device Disk Space ─────────────────────────────────────────────────

fn render_disk_space(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let title = format!("Device Disk Space — {}", app.config.storage.resolved_volume_path().display());
    let block = section(&title, theme, false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let d = &app.disk;
    f.render_widget(Paragraph::new(kv("Total:", fmt_gb(d.total_bytes), theme)), rows[0]);
    f.render_widget(Paragraph::new(kv("Used:", fmt_gb(d.used_bytes), theme)), rows[1]);

    let pct = d.use_pct();
    let gauge = Gauge::default()
        .gauge_style(theme.util_style(pct))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(fmt_pct(pct), theme.text));
    let gauge_area = Rect { x: rows[2].x + 1, width: rows[2].width.saturating_sub(2), ..rows[2] };
    f.render_widget(gauge, gauge_area);
}

// ── Device Available Capacity ─────────────────────────────────────────

fn render_capacity(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = section("Device Available Capacity", theme, false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let d = &app.disk;
    let lines = vec![
        kv("For Usage:",               fmt_gb(d.available_bytes), theme),
        kv("For Important Usage:",     fmt_gb(d.available_for_important_usage), theme),
        kv("For Opportunistic Usage:", fmt_gb(d.available_for_opportunistic_usage), theme),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
