use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::cloze::{ClozeResult, Token};

/// Colors and widget helpers shared by the studio screens.
pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Blue;
    pub const BLANK: Color = Color::Magenta;
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const MUTED: Color = Color::Gray;
    pub const KEY_FG: Color = Color::Rgb(255, 255, 255);

    pub fn label() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn blank() -> Style {
        Style::default()
            .fg(Self::BLANK)
            .add_modifier(Modifier::BOLD)
    }

    pub fn backdrop<'a>() -> Block<'a> {
        Block::default()
    }

    pub fn panel<'a>(title: impl Into<String>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Self::muted())
            .title(Self::title_line(title))
            .title_alignment(Alignment::Left)
    }

    pub fn title_line(title: impl Into<String>) -> Line<'static> {
        Line::from(vec![Span::styled(
            format!(" {} ", title.into()),
            Self::label(),
        )])
    }

    pub fn label_span(text: impl Into<String>) -> Span<'static> {
        Span::styled(text.into(), Self::label())
    }

    pub fn span(text: impl Into<String>) -> Span<'static> {
        Span::raw(text.into())
    }

    pub fn key_chip(text: impl Into<String>) -> Span<'static> {
        Span::styled(
            format!(" {} ", text.into()),
            Style::default()
                .fg(Self::KEY_FG)
                .bg(Self::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    }

    pub fn bullet() -> Span<'static> {
        Self::span(" • ")
    }

    /// One line of spans whose text, concatenated, is exactly
    /// `render_text(result)`. Blanks get their own style.
    pub fn cloze_line(result: &ClozeResult) -> Line<'static> {
        let mut spans = Vec::with_capacity(result.len() * 2);
        for (i, token) in result.tokens().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let span = match token {
                Token::Blank { .. } => Span::styled(token.as_str().to_string(), Self::blank()),
                Token::Kept { word } => Span::raw(word.clone()),
            };
            spans.push(span);
        }
        Line::from(spans)
    }
}
