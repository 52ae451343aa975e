mod components;
mod forms;

use crate::app::{App, Tab};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());
    let (Some(&header), Some(&body), Some(&footer)) = (chunks.first(), chunks.get(1), chunks.get(2))
    else {
        return;
    };

    render_tabs(f, header, app.tab);
    match app.tab {
        Tab::Log => forms::render_log_form(f, body, app),
        Tab::Retrieve => forms::render_retrieve_form(f, body, app),
    }

    let keybindings: &[(&str, &str)] = match app.tab {
        Tab::Log => &[("Tab", "Switch tab"), ("Up/Down", "Field"), ("Enter", "Next/Save"), ("Esc", "Quit")],
        Tab::Retrieve => &[("Tab", "Switch tab"), ("Enter", "Retrieve"), ("Esc", "Quit")],
    };
    components::render_navigation_footer(f, footer, "MEETLOG", keybindings);
}

fn render_tabs(f: &mut Frame, area: ratatui::layout::Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(Span::raw(format!(" {} ", tab.title()))))
        .collect();
    let selected = Tab::ALL.iter().position(|tab| *tab == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Meet App ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}
