use crate::ui::popup::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(62, 24, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" spaceeater — Keybindings (? or Esc to close) ", theme.title));

    let lines = vec![
        key_line(theme, "Form", ""),
        key_line(theme, "  ↑↓ / j k",       "Select file size / file count"),
        key_line(theme, "  ←→ / h l / - +", "Step the selected value"),
        Line::from(""),
        key_line(theme, "Files", ""),
        key_line(theme, "  g",  "Generate files"),
        key_line(theme, "  d",  "Delete one file"),
        key_line(theme, "  D",  "Delete all files (asks first)"),
        Line::from(""),
        key_line(theme, "Global", ""),
        key_line(theme, "  r",          "Refresh disk figures"),
        key_line(theme, "  t",          "Cycle color theme"),
        key_line(theme, "  ? / F1",     "Toggle this help"),
        key_line(theme, "  q / Ctrl-C", "Quit"),
        Line::from(""),
        key_line(theme, "CLI modes", ""),
        key_line(theme, "  --status",     "Print disk report and exit"),
        key_line(theme, "  --json",       "Print JSON snapshot and exit"),
        key_line(theme, "  --generate",   "Write files with saved count/size"),
        key_line(theme, "  --delete N",   "Delete N entries"),
        key_line(theme, "  --delete-all", "Delete every entry (needs --yes)"),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn key_line(theme: &Theme, key: &str, desc: &str) -> Line<'static> {
    if desc.is_empty() {
        return Line::from(Span::styled(key.to_string(), theme.title));
    }
    Line::from(vec![
        Span::styled(format!("{:<20}", key), theme.value),
        Span::styled(desc.to_string(), theme.text),
    ])
}
