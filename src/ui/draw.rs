use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::{Frame, Terminal};

use crate::config::RgbColor;

use super::app::App;

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw_frame(frame, app))?;
    Ok(())
}

fn draw_frame(frame: &mut Frame<'_>, app: &mut App) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(frame, layout[0], app);
    draw_list(frame, layout[1], app);
    draw_footer(frame, layout[2], app);
    draw_share_modal(frame, size, app);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    // The button label follows the exact-equality rule: any partial
    // selection still reads "Select All".
    let button = if app.all_selected() {
        "[ Unselect All ]"
    } else {
        "[ Select All ]"
    };
    let button_width = button.chars().count() as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(button_width)])
        .split(area);

    let title = format!(
        "EXPORT CONTACTS   {}/{} selected",
        app.selection.selected_count(),
        app.contacts.len()
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(title, header_text_style(app)))),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(button, selection_style(app)))),
        chunks[1],
    );
}

fn draw_list(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .contacts
        .iter()
        .enumerate()
        .map(|(index, contact)| {
            let mark = if app.selection.is_selected(index) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(Line::from(format!(
                "{mark} {} - {}",
                contact.name, contact.number
            )))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app))
        .title("Contacts");

    if items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No contacts loaded").style(header_text_style(app)),
            inner,
        );
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(selection_style(app));

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let message = match &app.status {
        Some(status) => status.clone(),
        None => hint_line(app),
    };

    let colors = app.ui_colors();
    let style = Style::default()
        .fg(color(colors.status_fg))
        .bg(color(colors.status_bg));

    let background = Block::default().style(Style::default().bg(color(colors.status_bg)));
    frame.render_widget(background, area);

    frame.render_widget(Paragraph::new(message).style(style), area);
}

fn hint_line(app: &App) -> String {
    let keys = app.keys();
    format!(
        "{}/{}: nav  {}: toggle  {}: select/unselect all  {}: export  {}: batches  {}: quit",
        keys.next,
        keys.prev,
        keys.toggle,
        keys.toggle_all,
        keys.export,
        keys.export_batches,
        keys.quit
    )
}

fn draw_share_modal(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(modal) = &app.share_modal else {
        return;
    };

    let widest = modal
        .files
        .iter()
        .map(|f| f.display().to_string().chars().count())
        .max()
        .unwrap_or(0) as u16;

    let width = (widest + 4).max(28).min(area.width);
    let height = (modal.files.len() as u16 + 2).max(3).min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal_area);

    let title = Line::from(Span::styled(" SHARE ", header_text_style(app)));
    let footer = Line::from(Span::styled(" s: share  Esc: close ", header_text_style(app)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app))
        .title(title)
        .title_bottom(footer)
        .title_alignment(Alignment::Center);

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let lines: Vec<Line> = modal
        .files
        .iter()
        .map(|f| Line::from(f.display().to_string()))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn selection_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
}

fn border_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default().fg(color(colors.border))
}

fn header_text_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default().fg(color(colors.status_fg))
}

fn color(rgb: RgbColor) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
