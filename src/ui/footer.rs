use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("q", "Quit"), ("↑↓", "Select"), ("←→", "Step"), ("g", "Generate"),
    ("d", "Delete one"), ("D", "Delete all"), ("r", "Refresh"), ("t", "Theme"), ("?", "Help"),
];

pub fn render_footer(f: &mut Frame, area: Rect, flash: Option<&str>, theme: &Theme) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];

    for (key, desc) in KEYS {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    if let Some(text) = flash {
        spans.push(Span::styled("  \u{2502}  ", theme.footer_text));
        spans.push(Span::styled(text.to_string(), theme.ok));
    }

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
