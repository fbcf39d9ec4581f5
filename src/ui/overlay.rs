use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::layout::centered_rect;

pub fn draw_loading_overlay(frame: &mut Frame<'_>, area: Rect, page: usize) {
    draw_popup(
        frame,
        area,
        "Loading",
        &format!("Loading... page {page}"),
        Color::Yellow,
        34,
    );
}

/// Shows the document failure message over the page area.
pub fn draw_error_overlay(frame: &mut Frame<'_>, area: Rect, message: &str) {
    draw_popup(frame, area, "Error", message, Color::Red, 56);
}

fn draw_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    message: &str,
    color: Color,
    max_width: u16,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(area, area.width.min(max_width), area.height.min(5));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let text = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));
    frame.render_widget(text, inner);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::error::DOCUMENT_FAILURE_MESSAGE;

    use super::{draw_error_overlay, draw_loading_overlay};

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn error_overlay_shows_the_failure_message() {
        let mut terminal =
            Terminal::new(TestBackend::new(70, 12)).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                draw_error_overlay(frame, Rect::new(0, 0, 70, 12), DOCUMENT_FAILURE_MESSAGE)
            })
            .expect("draw should pass");

        let text = rendered_text(&terminal);
        assert!(text.contains("Error"));
        assert!(text.contains("Failed to load the PDF."));
    }

    #[test]
    fn loading_overlay_names_the_page() {
        let mut terminal =
            Terminal::new(TestBackend::new(40, 10)).expect("test terminal should initialize");
        terminal
            .draw(|frame| draw_loading_overlay(frame, Rect::new(0, 0, 40, 10), 3))
            .expect("draw should pass");
        assert!(rendered_text(&terminal).contains("Loading... page 3"));
    }

    #[test]
    fn overlays_ignore_empty_areas() {
        let mut terminal =
            Terminal::new(TestBackend::new(10, 4)).expect("test terminal should initialize");
        terminal
            .draw(|frame| draw_error_overlay(frame, Rect::new(0, 0, 0, 0), "x"))
            .expect("draw should pass");
        assert!(!rendered_text(&terminal).contains('x'));
    }
}
