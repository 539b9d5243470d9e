//! TUI rendering
//!
//! Display panel on top, keypad below it, keyboard help on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::evaluator::Evaluate;

/// Renders the calculator UI to the frame
pub fn render<E: Evaluate>(app: &CalculatorApp<E>, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Screen regions: display panel, keypad, help sidebar
fn regions(area: Rect) -> (Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(34),    // Display + keypad
            Constraint::Length(26), // Help sidebar
        ])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Display
            Constraint::Min(9),    // Keypad
        ])
        .split(columns[0]);

    (rows[0], rows[1], columns[1])
}

/// Where the keypad is drawn on a screen of size `area`
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    regions(area).1
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a, E> {
    app: &'a CalculatorApp<E>,
}

impl<'a, E: Evaluate> CalculatorUI<'a, E> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp<E>) -> Self {
        Self { app }
    }

    /// Renders the display panel: indicators on the first line, the
    /// right-aligned buffer on the second
    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let controller = self.app.controller();

        let mut indicators = vec![Span::styled(
            controller.angle_mode().label(),
            Style::default().fg(Color::Cyan),
        )];
        if controller.has_memory() {
            indicators.push(Span::raw(" "));
            indicators.push(Span::styled(
                MEMORY_BADGE,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let display_style = if controller.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if controller.result_shown() {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let lines = vec![
            Line::from(indicators),
            Line::from(Span::styled(controller.display(), display_style))
                .alignment(Alignment::Right),
        ];

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    /// Renders the keypad area
    fn render_keypad(&self, area: Rect, buf: &mut Buffer) {
        KeypadWidget::new(self.app.keypad(), self.app.controller().angle_mode()).render(area, buf);
    }

    /// Renders the help sidebar
    fn render_help_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>6}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl<E: Evaluate> Widget for CalculatorUI<'_, E> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let (display, keypad, help) = regions(area);
        self.render_display(display, buf);
        self.render_keypad(keypad, buf);
        self.render_help_sidebar(help, buf);
    }
}

/// Window title
pub const TITLE: &str = " Scientific Calculator ";

/// Shown while the memory register is non-zero
pub const MEMORY_BADGE: &str = "M";

/// Keyboard shortcuts listed in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-*/^", "Operators"),
    ("( ) !", "Parens, factorial"),
    ("= ⏎", "Evaluate"),
    ("⌫", "Delete last"),
    ("Esc", "All clear"),
    ("s c t", "sin cos tan"),
    ("r l n", "√ log ln"),
    ("p", "π"),
    ("i", "Change sign"),
    ("d", "DEG/RAD"),
    ("m M", "M+ M-"),
    ("R x", "MR MC"),
    ("q", "Quit"),
];
