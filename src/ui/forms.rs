use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::components::{self, TextInputConfig};
use crate::app::{App, LogField};

pub fn render_log_form(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);
    let (Some(&name_area), Some(&details_area), Some(&notice_area)) =
        (chunks.first(), chunks.get(1), chunks.get(2))
    else {
        return;
    };

    components::render_text_input(
        f,
        name_area,
        TextInputConfig {
            content: app.name_input.content(),
            title: "Person's Name",
            placeholder: "Enter name here...",
            focused: app.log_field == LogField::Name,
            cursor_position: app.name_input.cursor_position(),
        },
    );
    components::render_text_input(
        f,
        details_area,
        TextInputConfig {
            content: app.details_input.content(),
            title: "Interaction Details",
            placeholder: "Describe the interaction...",
            focused: app.log_field == LogField::Details,
            cursor_position: app.details_input.cursor_position(),
        },
    );

    if let Some(notice) = &app.notice {
        components::render_notice(f, notice_area, notice);
    }
}

pub fn render_retrieve_form(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    let (Some(&query_area), Some(&result_area)) = (chunks.first(), chunks.get(1)) else {
        return;
    };

    components::render_text_input(
        f,
        query_area,
        TextInputConfig {
            content: app.query_input.content(),
            title: "Ask in natural language",
            placeholder: "e.g., 'what did I discuss with Pritha'",
            focused: true,
            cursor_position: app.query_input.cursor_position(),
        },
    );

    if let Some(answer) = &app.answer {
        components::render_answer(f, result_area, answer);
    } else if let Some(notice) = &app.notice {
        components::render_notice(f, result_area, notice);
    }
}
