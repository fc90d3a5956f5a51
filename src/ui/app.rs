use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::config::{Config, Keys, UiColors};
use crate::contact::Contact;
use crate::export;
use crate::selection::Selection;
use crate::share;

use super::draw;

/// Files written by the most recent export, offered to the share command.
pub struct ShareModal {
    pub files: Vec<PathBuf>,
}

pub struct App<'a> {
    config: &'a Config,
    pub contacts: Vec<Contact>,
    pub selection: Selection,
    pub list_state: ListState,
    pub status: Option<String>,
    pub share_modal: Option<ShareModal>,
}

impl<'a> App<'a> {
    pub fn new(contacts: Vec<Contact>, config: &'a Config) -> Self {
        let mut list_state = ListState::default();
        if !contacts.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            config,
            contacts,
            selection: Selection::new(),
            list_state,
            status: None,
            share_modal: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: ratatui::backend::Backend,
    {
        loop {
            draw::render(terminal, self)?;

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key)? {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        // Ctrl+C always quits (hardcoded for safety)
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Ok(true);
        }

        if self.share_modal.is_some() {
            self.handle_share_modal_key(key);
            return Ok(false);
        }

        if key_matches(&self.config.keys.quit, &key) || matches!(key.code, KeyCode::Esc) {
            return Ok(true);
        }

        if key_matches(&self.config.keys.next, &key) || matches!(key.code, KeyCode::Down) {
            self.next();
        } else if key_matches(&self.config.keys.prev, &key) || matches!(key.code, KeyCode::Up) {
            self.prev();
        } else if key_matches(&self.config.keys.toggle, &key) {
            self.toggle_current();
        } else if key_matches(&self.config.keys.toggle_all, &key) {
            self.selection.toggle_all(self.contacts.len());
        } else if key_matches(&self.config.keys.export, &key) {
            self.export_selected(false);
        } else if key_matches(&self.config.keys.export_batches, &key) {
            self.export_selected(true);
        }

        Ok(false)
    }

    fn handle_share_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.share_modal = None;
            }
            KeyCode::Char('s') => {
                let Some(modal) = self.share_modal.take() else {
                    return;
                };
                match self.config.commands.share.as_ref() {
                    Some(command) => match share::dispatch(command, &modal.files) {
                        Ok(()) => self.set_status("Files handed to the share command"),
                        Err(err) => self.set_status(format!("Share failed: {err}")),
                    },
                    None => self.set_status("Share command not configured"),
                }
            }
            _ => {}
        }
    }

    fn next(&mut self) {
        if self.contacts.is_empty() {
            return;
        }
        let last = self.contacts.len() - 1;
        let index = match self.list_state.selected() {
            Some(current) => (current + 1).min(last),
            None => 0,
        };
        self.list_state.select(Some(index));
    }

    fn prev(&mut self) {
        if self.contacts.is_empty() {
            return;
        }
        let index = match self.list_state.selected() {
            Some(current) => current.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(index));
    }

    fn toggle_current(&mut self) {
        if let Some(index) = self.list_state.selected() {
            self.selection.toggle(index);
        }
    }

    fn selected_contacts(&self) -> Vec<Contact> {
        self.selection
            .selected_in_order(self.contacts.len())
            .into_iter()
            .map(|index| self.contacts[index].clone())
            .collect()
    }

    fn export_selected(&mut self, batches: bool) {
        let chosen = self.selected_contacts();
        let result = if batches {
            export::write_batches(&self.config.export_dir, &chosen, self.config.batch_size)
        } else {
            export::write_single(&self.config.export_dir, &chosen).map(|file| vec![file])
        };

        match result {
            Ok(files) => {
                self.set_status(format!(
                    "Exported {} contact(s) to {} file(s)",
                    chosen.len(),
                    files.len()
                ));
                self.share_modal = Some(ShareModal { files });
            }
            Err(err) => self.set_status(format!("Export failed: {err}")),
        }
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    pub fn ui_colors(&self) -> &UiColors {
        &self.config.ui.colors
    }

    pub fn keys(&self) -> &Keys {
        &self.config.keys
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.contacts.len())
    }
}

/// Match a configured binding name against a key event. Single characters
/// match literally; longer names cover the special keys.
fn key_matches(binding: &str, event: &KeyEvent) -> bool {
    match binding.to_ascii_lowercase().as_str() {
        "enter" => matches!(event.code, KeyCode::Enter),
        "tab" => matches!(event.code, KeyCode::Tab),
        "esc" | "escape" => matches!(event.code, KeyCode::Esc),
        "space" => matches!(event.code, KeyCode::Char(' ')),
        "up" => matches!(event.code, KeyCode::Up),
        "down" => matches!(event.code, KeyCode::Down),
        "left" => matches!(event.code, KeyCode::Left),
        "right" => matches!(event.code, KeyCode::Right),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(first), None) => matches!(event.code, KeyCode::Char(c) if c == first),
                _ => false,
            }
        }
    }
}
