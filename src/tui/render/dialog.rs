use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::dialog::{Dialog, Menu, NUMBER_HELP, NumberInput, YesNo};
use crate::util::unicode::{display_width, fit_left};

/// Render whichever dialog is open as a centered overlay
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    match &app.dialog {
        None => {}
        Some(Dialog::Sort(menu)) => render_menu(frame, menu, area),
        Some(Dialog::Remove { prompt, .. }) => render_yes_no(frame, prompt, area),
        Some(Dialog::Limit { input, .. }) => render_number_input(frame, input, area),
    }
}

/// The highlighted entry stands out against the reversed window
fn selected_style() -> Style {
    Style::default().remove_modifier(Modifier::REVERSED)
}

fn window(frame: &mut Frame, area: Rect, width: usize, height: usize) -> (Rect, Block<'static>) {
    let w = (width as u16).min(area.width);
    let h = (height as u16).min(area.height);
    let rect = centered_rect_fixed(w, h, area);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));
    (rect, block)
}

fn render_menu<T>(frame: &mut Frame, menu: &Menu<T>, area: Rect) {
    let label_w = menu
        .options
        .iter()
        .map(|(_, label)| display_width(label))
        .max()
        .unwrap_or(0);
    let width = (label_w + 4).max(display_width(&menu.title) + 3);
    let height = menu.options.len() + 2;
    let (rect, block) = window(frame, area, width, height);

    let lines: Vec<Line> = menu
        .options
        .iter()
        .enumerate()
        .map(|(i, (_, label))| {
            let text = fit_left(label, width.saturating_sub(4));
            let span = if i == menu.selected {
                Span::styled(text, selected_style())
            } else {
                Span::raw(text)
            };
            Line::from(vec![Span::raw(" "), span])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block.title(menu.title.clone()));
    frame.render_widget(paragraph, rect);
}

fn render_yes_no(frame: &mut Frame, prompt: &YesNo, area: Rect) {
    let width = display_width(&prompt.message) + 4;
    let (rect, block) = window(frame, area, width, 5);

    let (yes, no) = if prompt.yes {
        (selected_style(), Style::default())
    } else {
        (Style::default(), selected_style())
    };
    let indent = (width / 2).saturating_sub(7);
    let lines = vec![
        Line::from(format!(" {}", prompt.message)),
        Line::default(),
        Line::from(vec![
            Span::raw(" ".repeat(indent)),
            Span::styled("Yes", yes),
            Span::raw("  "),
            Span::styled("No", no),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn render_number_input(frame: &mut Frame, input: &NumberInput, area: Rect) {
    let message: Vec<&str> = std::iter::once(input.prompt.as_str())
        .chain(NUMBER_HELP)
        .collect();
    let width = message.iter().map(|l| display_width(l)).max().unwrap_or(0) + 4;
    let height = message.len() + 3;
    let (rect, block) = window(frame, area, width, height);

    let mut lines: Vec<Line> = message
        .iter()
        .map(|l| Line::from(format!(" {}", l)))
        .collect();
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            fit_left(&input.buffer, width.saturating_sub(4)),
            selected_style(),
        ),
    ]));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
