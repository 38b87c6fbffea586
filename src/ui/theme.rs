use ratatui::style::{Color, Modifier, Style};

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Dracula,
    Gruvbox,
    Nord,
}

impl ThemeVariant {
    const ALL: [ThemeVariant; 4] = [Self::Default, Self::Dracula, Self::Gruvbox, Self::Nord];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dracula => "Dracula",
            Self::Gruvbox => "Gruvbox",
            Self::Nord    => "Nord",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn from_name(name: &str) -> Self {
        Self::ALL.iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(name))
            .unwrap_or(Self::Default)
    }
}

// ── Palettes ────────────────────────────────────────────────────────────

/// The handful of colors a theme is derived from.
struct Palette {
    frame:   Color,
    accent:  Color,
    fg:      Color,
    dim:     Color,
    bar_bg:  Color,
    good:    Color,
    caution: Color,
    hot:     Color,
    bad:     Color,
}

impl Palette {
    fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self {
                frame: Color::DarkGray, accent: Color::Cyan, fg: Color::White, dim: Color::Gray,
                bar_bg: Color::DarkGray, good: Color::Green, caution: Color::Yellow,
                hot: Color::LightRed, bad: Color::Red,
            },
            // https://draculatheme.com/
            ThemeVariant::Dracula => Self {
                frame: rgb(0x6272a4), accent: rgb(0xbd93f9), fg: rgb(0xf8f8f2), dim: rgb(0x6272a4),
                bar_bg: rgb(0x44475a), good: rgb(0x50fa7b), caution: rgb(0xf1fa8c),
                hot: rgb(0xffb86c), bad: rgb(0xff5555),
            },
            // https://github.com/morhetz/gruvbox
            ThemeVariant::Gruvbox => Self {
                frame: rgb(0x504945), accent: rgb(0x83a598), fg: rgb(0xebdbb2), dim: rgb(0xa89984),
                bar_bg: rgb(0x3c3836), good: rgb(0xb8bb26), caution: rgb(0xfabd2f),
                hot: rgb(0xfe8019), bad: rgb(0xfb4934),
            },
            // https://www.nordtheme.com/
            ThemeVariant::Nord => Self {
                frame: rgb(0x4c566a), accent: rgb(0x88c0d0), fg: rgb(0xe5e9f0), dim: rgb(0x81a1c1),
                bar_bg: rgb(0x3b4252), good: rgb(0xa3be8c), caution: rgb(0xebcb8b),
                hot: rgb(0xd08770), bad: rgb(0xbf616a),
            },
        }
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Theme {
    pub border:         Style,
    pub border_focused: Style,
    pub title:          Style,
    pub text:           Style,
    pub text_dim:       Style,
    pub selected:       Style,
    pub value:          Style,
    pub ok:             Style,
    pub warn:           Style,
    pub crit:           Style,
    pub bar_low:        Style,
    pub bar_mid:        Style,
    pub bar_high:       Style,
    pub bar_crit:       Style,
    pub footer_bg:      Style,
    pub footer_key:     Style,
    pub footer_text:    Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        let p = Palette::for_variant(v);
        Self {
            border:         Style::default().fg(p.frame),
            border_focused: Style::default().fg(p.accent),
            title:          Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(p.fg),
            text_dim:       Style::default().fg(p.dim),
            selected:       Style::default().fg(Color::Black).bg(p.accent),
            value:          Style::default().fg(p.accent),
            ok:             Style::default().fg(p.good),
            warn:           Style::default().fg(p.caution),
            crit:           Style::default().fg(p.bad).add_modifier(Modifier::BOLD),
            bar_low:        Style::default().fg(p.good).bg(p.bar_bg),
            bar_mid:        Style::default().fg(p.caution).bg(p.bar_bg),
            bar_high:       Style::default().fg(p.hot).bg(p.bar_bg),
            bar_crit:       Style::default().fg(p.bad).bg(p.bar_bg).add_modifier(Modifier::BOLD),
            footer_bg:      Style::default().bg(p.bar_bg).fg(p.fg),
            footer_key:     Style::default().bg(p.bar_bg).fg(p.accent).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(p.bar_bg).fg(p.dim),
        }
    }

    /// Pick a fill-gradient style for a 0–100 value.
    pub fn util_style(&self, pct: f64) -> Style {
        if      pct >= 95.0 { self.bar_crit }
        else if pct >= 85.0 { self.bar_high }
        else if pct >= 70.0 { self.bar_mid  }
        else                 { self.bar_low  }
    }
}
