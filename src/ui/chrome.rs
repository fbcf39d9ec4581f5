use ratatui::Frame;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::viewer::{LoadState, ViewSnapshot};

use super::layout::UiLayout;

pub fn status_text(view: &ViewSnapshot, presenter_label: &str) -> String {
    let file_name = view.file_name().unwrap_or_else(|| "-".to_string());
    let page = if view.total_pages == 0 {
        "page -/-".to_string()
    } else {
        format!("page {}/{}", view.current_page, view.total_pages)
    };
    let state = match view.load_state {
        LoadState::Loading => " | loading",
        LoadState::Ready if view.rendering => " | rendering",
        LoadState::Ready => "",
        LoadState::Failed => " | error",
    };
    let notice = view
        .notice
        .as_deref()
        .map(|notice| format!(" | {notice}"))
        .unwrap_or_default();

    format!(
        "{} | {} | {} | zoom {}%{}{} | {}",
        view.variant.as_str(),
        file_name,
        page,
        view.zoom_percent,
        state,
        notice,
        presenter_label
    )
}

pub fn draw_chrome(
    frame: &mut Frame<'_>,
    layout: UiLayout,
    view: &ViewSnapshot,
    presenter_label: &str,
) {
    if layout.status.height == 0 {
        return;
    }

    let style = if view.failure.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let status = Paragraph::new(status_text(view, presenter_label))
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(status, layout.status);
}
