use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_busy(f: &mut Frame, label: &str, theme: &Theme) {
    render_box(f, 48, 5, " Working ", theme.border_focused, theme, vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", label), theme.text)),
    ]);
}

pub fn render_error(f: &mut Frame, msg: &str, theme: &Theme) {
    render_box(f, 64, 9, " File Operation Failed ", theme.crit, theme, vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", msg), theme.crit)),
        Line::from(""),
        Line::from(Span::styled("  Press Esc or Enter to dismiss", theme.text_dim)),
    ]);
}

pub fn render_confirm_delete_all(f: &mut Frame, theme: &Theme) {
    render_box(f, 60, 8, " Delete All Files ", theme.warn, theme, vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Do you really want to delete all the files created by this tool?",
            theme.text,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme.footer_key),
            Span::styled(" DELETE    ", theme.crit),
            Span::styled(" n / Esc ", theme.footer_key),
            Span::styled(" Cancel", theme.text_dim),
        ]),
    ]);
}

fn render_box(
    f:      &mut Frame,
    width:  u16,
    height: u16,
    title:  &str,
    border: Style,
    theme:  &Theme,
    lines:  Vec<Line>,
) {
    let area = centered_rect(width, height, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title.to_string(), theme.title));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

pub(crate) fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect::new(
        r.x + (r.width.saturating_sub(w)) / 2,
        r.y + (r.height.saturating_sub(h)) / 2,
        w, h,
    )
}
