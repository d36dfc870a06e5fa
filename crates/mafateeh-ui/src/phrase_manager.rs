use crate::common::{centered_rect, clamp_cursor, terminal_error};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mafateeh_core::{
    MafateehError, Mode, PhraseForm, PhraseManager, PhraseStore, Result, SystemClipboard,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, stdout};
use std::time::Duration;
use tracing::debug;

const PREVIEW_CHARS: usize = 60;

struct ManagerState {
    manager: PhraseManager,
    list_state: ListState,
    form: Option<PhraseForm>,
    status: Option<(String, Color)>,
    exiting: bool,
}

impl ManagerState {
    fn new(manager: PhraseManager) -> Self {
        let mut state = Self {
            manager,
            list_state: ListState::default(),
            form: None,
            status: None,
            exiting: false,
        };
        state.clamp();
        state
    }

    fn clamp(&mut self) {
        let cursor = clamp_cursor(self.list_state.selected(), self.manager.phrases().len());
        self.list_state.select(cursor);
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.manager.phrases().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.list_state.select(Some(next));
    }

    fn set_status(&mut self, message: impl Into<String>, color: Color) {
        self.status = Some((message.into(), color));
    }
}

/// Display the saved phrases screen of the host app
pub fn display_phrase_manager(store: &PhraseStore) -> Result<()> {
    let manager = PhraseManager::load(store)?;

    enable_raw_mode().map_err(terminal_error)?;
    execute!(stdout(), EnterAlternateScreen).map_err(terminal_error)?;

    let backend = CrosstermBackend::new(stdout());
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => run_manager(&mut terminal, &mut ManagerState::new(manager), store),
        Err(e) => Err(terminal_error(e)),
    };

    // Clean up terminal
    disable_raw_mode().map_err(terminal_error)?;
    execute!(stdout(), LeaveAlternateScreen).map_err(terminal_error)?;

    result
}

fn run_manager(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ManagerState,
    store: &PhraseStore,
) -> Result<()> {
    while !state.exiting {
        draw(terminal, state).map_err(terminal_error)?;

        if !event::poll(Duration::from_millis(250)).map_err(terminal_error)? {
            continue;
        }
        if let Event::Key(key) = event::read().map_err(terminal_error)? {
            if key.kind == KeyEventKind::Press {
                handle_key(state, key, store)?;
            }
        }
    }
    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ManagerState,
) -> io::Result<()> {
    terminal.draw(|f| {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Phrases
                Constraint::Length(1), // Status
                Constraint::Length(2), // Help
            ])
            .split(size);

        let title = Paragraph::new("My Clipboard")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        if state.manager.phrases().is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "You have no saved phrases",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press 'a' to add one"),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Saved "));
            f.render_widget(empty, chunks[1]);
        } else {
            let list = phrase_list(&state.manager);
            f.render_stateful_widget(list, chunks[1], &mut state.list_state);
        }

        if let Some((message, color)) = &state.status {
            let status = Paragraph::new(message.as_str())
                .style(Style::default().fg(*color))
                .alignment(Alignment::Center);
            f.render_widget(status, chunks[2]);
        }

        let help = Paragraph::new(help_line(&state.manager, state.form.is_some()))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[3]);

        if let Some(form) = &state.form {
            let area = centered_rect(70, 40, size);
            let title = if form.editing().is_some() {
                " Edit Phrase "
            } else {
                " Add Phrase "
            };
            let editor = Paragraph::new(format!("{}▏", form.text))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(Style::default().fg(Color::Yellow)),
                );
            f.render_widget(Clear, area);
            f.render_widget(editor, area);
        }
    })?;
    Ok(())
}

fn phrase_list(manager: &PhraseManager) -> List<'static> {
    let selecting = manager.mode() == Mode::Select;
    let items: Vec<ListItem> = manager
        .phrases()
        .iter()
        .map(|phrase| {
            let mut spans = Vec::new();
            if selecting {
                let mark = if manager.is_selected(phrase.id) {
                    "[x] "
                } else {
                    "[ ] "
                };
                spans.push(Span::styled(mark, Style::default().fg(Color::Red)));
            }
            spans.push(Span::raw(phrase.preview(PREVIEW_CHARS)));
            spans.push(Span::styled(
                format!("  {}", phrase.formatted_time()),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if selecting {
        format!(" Saved - {} selected ", manager.selected_count())
    } else {
        " Saved ".to_string()
    };

    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn help_line(manager: &PhraseManager, editing: bool) -> &'static str {
    if editing {
        "Enter: save | Ctrl+J: new line | Esc: cancel"
    } else if manager.mode() == Mode::Select {
        "Space: toggle | A: select all | x: delete selected | s/Esc: done"
    } else {
        "a: add | Enter: edit | d: delete | c: copy | s: select | r: refresh | q: quit"
    }
}

fn handle_key(state: &mut ManagerState, key: KeyEvent, store: &PhraseStore) -> Result<()> {
    if state.form.is_some() {
        return handle_form_key(state, key, store);
    }

    state.status = None;
    match (state.manager.mode(), key.code) {
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => state.move_cursor(false),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => state.move_cursor(true),
        (_, KeyCode::Char('r')) => state.manager.refresh(store)?,
        (_, KeyCode::Char('s')) => state.manager.toggle_select_mode(),

        (Mode::Browse, KeyCode::Char('q')) | (Mode::Browse, KeyCode::Esc) => state.exiting = true,
        (Mode::Browse, KeyCode::Char('a')) => state.form = Some(PhraseForm::new_phrase()),
        (Mode::Browse, KeyCode::Enter) => {
            let picked = state
                .list_state
                .selected()
                .and_then(|i| state.manager.phrases().get(i))
                .map(|phrase| phrase.id);
            if let Some(id) = picked {
                // Rows may have shifted if the keyboard changed the store.
                state.manager.refresh(store)?;
                let index = state.manager.phrases().iter().position(|p| p.id == id);
                state.list_state.select(index);
                match index {
                    Some(index) => state.form = state.manager.edit_form(index),
                    None => state.set_status("That phrase was deleted elsewhere", Color::Red),
                }
            }
        }
        (Mode::Browse, KeyCode::Char('d')) | (Mode::Browse, KeyCode::Delete) => {
            if let Some(index) = state.list_state.selected() {
                if state.manager.swipe_delete(index, store)? {
                    state.set_status("Phrase deleted", Color::Green);
                }
            }
        }
        (Mode::Browse, KeyCode::Char('c')) => copy_current(state),

        (Mode::Select, KeyCode::Esc) => state.manager.toggle_select_mode(),
        (Mode::Select, KeyCode::Char(' ')) => {
            if let Some(phrase) = state
                .list_state
                .selected()
                .and_then(|i| state.manager.phrases().get(i))
            {
                let id = phrase.id;
                state.manager.toggle_selected(id);
            }
        }
        (Mode::Select, KeyCode::Char('A')) => state.manager.select_all(),
        (Mode::Select, KeyCode::Char('x')) => {
            if state.manager.can_delete_selected() {
                let removed = state.manager.delete_selected(store)?;
                state.set_status(format!("Deleted {} phrase(s)", removed), Color::Green);
            }
        }
        _ => {}
    }

    state.clamp();
    Ok(())
}

fn handle_form_key(state: &mut ManagerState, key: KeyEvent, store: &PhraseStore) -> Result<()> {
    let Some(form) = state.form.as_mut() else {
        return Ok(());
    };

    match key.code {
        KeyCode::Esc => state.form = None,
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.text.push('\n')
        }
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
        KeyCode::Char(c) => form.text.push(c),
        KeyCode::Backspace => {
            form.text.pop();
        }
        KeyCode::Enter if form.can_save() => match form.submit(store) {
            Ok(phrase) => {
                debug!(id = %phrase.id, "saved phrase from manager");
                state.form = None;
                state.manager.refresh(store)?;
                let index = state
                    .manager
                    .phrases()
                    .iter()
                    .position(|p| p.id == phrase.id);
                state.list_state.select(index);
                state.set_status("Phrase saved", Color::Green);
            }
            Err(MafateehError::Duplicate(_)) => {
                state.set_status("That phrase is already saved", Color::Red);
            }
            Err(MafateehError::NotFound(_)) => {
                state.form = None;
                state.manager.refresh(store)?;
                state.set_status("That phrase was deleted elsewhere", Color::Red);
            }
            Err(e) => return Err(e),
        },
        _ => {}
    }

    state.clamp();
    Ok(())
}

fn copy_current(state: &mut ManagerState) {
    let Some(phrase) = state
        .list_state
        .selected()
        .and_then(|i| state.manager.phrases().get(i))
    else {
        return;
    };

    let copied = SystemClipboard::new().and_then(|mut clipboard| clipboard.set_text(&phrase.content));
    match copied {
        Ok(()) => state.set_status("Copied to clipboard", Color::Green),
        Err(e) => state.set_status(e.to_string(), Color::Red),
    }
}
