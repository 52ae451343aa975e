use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthChar;

use crate::app::{Answer, Notice};

const SEPARATOR: &str = "  ";
const CURSOR: &str = "█";

/// Configuration for text input rendering
pub struct TextInputConfig<'a> {
    pub content: &'a str,
    pub title: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub cursor_position: usize,
}

/// Renders a single-line input; the view scrolls so the cursor stays visible
pub fn render_text_input(frame: &mut Frame, area: Rect, config: TextInputConfig) {
    let prefix_style = Style::default().fg(if config.focused {
        Color::Cyan
    } else {
        Color::DarkGray
    });
    let mut spans = vec![Span::styled("> ", prefix_style)];

    if config.content.is_empty() {
        if config.focused {
            spans.push(cursor_span());
        }
        spans.push(Span::styled(
            config.placeholder,
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let chars: Vec<char> = config.content.chars().collect();
        let cursor = config.cursor_position.min(chars.len());
        // borders + prefix + cursor cell
        let available = usize::from(area.width.saturating_sub(5)).max(1);
        let start = scroll_start(&chars, cursor, available);

        let before: String = chars.iter().skip(start).take(cursor - start).collect();
        let after: String = chars.iter().skip(cursor).collect();
        spans.push(Span::styled(before, Style::default().fg(Color::White)));
        if config.focused {
            spans.push(cursor_span());
        }
        spans.push(Span::styled(after, Style::default().fg(Color::White)));
    }

    let border_color = if config.focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", config.title))
                .border_style(Style::default().fg(border_color)),
        ),
        area,
    );
}

fn cursor_span() -> Span<'static> {
    Span::styled(
        CURSOR,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::SLOW_BLINK),
    )
}

/// First visible character such that the text before the cursor fits `width` cells
fn scroll_start(chars: &[char], cursor: usize, width: usize) -> usize {
    let mut start = 0;
    let mut used: usize = chars
        .iter()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    while used >= width && start < cursor {
        used -= chars.get(start).and_then(|c| c.width()).unwrap_or(0);
        start += 1;
    }
    start
}

/// Renders a result banner in the notice's color
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let (label, text, color) = match notice {
        Notice::Success(text) => ("Saved", text, Color::Green),
        Notice::Info(text) => ("Info", text, Color::Blue),
        Notice::Error(text) => ("Error", text, Color::Red),
    };
    frame.render_widget(
        Paragraph::new(text.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", label))
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// Renders a found interaction in a bordered box
pub fn render_answer(frame: &mut Frame, area: Rect, answer: &Answer) {
    frame.render_widget(
        Paragraph::new(answer.details.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        format!(" {} ", answer.heading),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
        area,
    );
}

/// Renders a footer with mode indicator and keybindings
pub fn render_navigation_footer(
    f: &mut Frame,
    area: Rect,
    mode: &str,
    keybindings: &[(&str, &str)],
) {
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    for &(key, desc) in keybindings {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_start_keeps_cursor_visible() {
        let chars: Vec<char> = "abcdefghij".chars().collect();
        assert_eq!(scroll_start(&chars, 3, 5), 0);
        assert_eq!(scroll_start(&chars, 10, 5), 6);
    }

    #[test]
    fn test_scroll_start_counts_wide_chars() {
        let chars: Vec<char> = "日本語です".chars().collect();
        // each char is two cells wide
        assert_eq!(scroll_start(&chars, 5, 6), 3);
    }
}
