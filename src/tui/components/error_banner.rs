//! # ErrorBanner Component
//!
//! Shows the store's last API failure. Dismissed with `x`, or implicitly by
//! the next successful change to the list.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};

/// Height the banner needs, or 0 when there is nothing to show.
pub fn banner_height(error: Option<&str>) -> u16 {
    if error.is_some() { 3 } else { 0 }
}

pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl Component for ErrorBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::Red);
        let block = Block::bordered()
            .title(" Error ")
            .title_bottom(Line::from(" x Dismiss ").right_aligned())
            .border_style(style)
            .title_style(style.add_modifier(Modifier::BOLD));
        let paragraph = Paragraph::new(self.message)
            .style(Style::default().fg(Color::LightRed))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_height() {
        assert_eq!(banner_height(None), 0);
        assert_eq!(banner_height(Some("boom")), 3);
    }
}
