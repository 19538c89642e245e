// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Terminal front end: a 2x2 cell grid (two status bars on top, the talk
//! menu bottom-left, the scrollable detail panel bottom-right) painted
//! through a diff-based screen, driven by a single blocking event loop.

pub mod detail;
pub mod grid;
pub mod menu;
pub mod screen;
pub mod scroll;
pub mod text;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute, terminal};
use fahrplan_app::{AppCommand, AppState, FocusColumn, ListEntry, Talk};
use grid::{CellSpec, Grid, Padding};
use menu::Menu;
use screen::Screen;
use scroll::ScrollView;
use std::io::{self, Write};

const STATUS_HINT: &str = " fahrplan schedule - enter: select, tab: switch column";

const STATUS_ROW: usize = 0;
const BODY_ROW: usize = 1;
const LIST_COL: usize = 0;
const DETAIL_COL: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Idle,
    Changed,
    Quit,
}

/// All mutable UI state, owned by the event loop.
#[derive(Debug)]
struct Ui {
    grid: Grid,
    menu: Menu,
    viewer: Option<ScrollView>,
    open_talk: Option<Talk>,
}

impl Ui {
    fn new(entries: Vec<ListEntry>, width: u16, height: u16) -> Result<Self> {
        let mut grid = Grid::new(vec![
            vec![
                CellSpec {
                    height: Some(2),
                    padding: Padding::new(0, 1, 0, 0),
                    ..CellSpec::default()
                },
                CellSpec {
                    height: Some(2),
                    padding: Padding::new(0, 0, 0, 1),
                    ..CellSpec::default()
                },
            ],
            vec![
                CellSpec {
                    padding: Padding::new(0, 1, 0, 0),
                    ..CellSpec::default()
                },
                CellSpec {
                    padding: Padding::new(0, 0, 0, 1),
                    ..CellSpec::default()
                },
            ],
        ])?;
        grid.resize(width, height);

        let menu_height = grid.cell_at(BODY_ROW, LIST_COL)?.inner_height() as usize;
        let menu = Menu::new(entries, menu_height);

        Ok(Self {
            grid,
            menu,
            viewer: None,
            open_talk: None,
        })
    }

    /// Pushes every component's current text into its grid cell. Returns
    /// whether any cell content actually changed.
    fn refresh_all(&mut self, state: &AppState) -> Result<bool> {
        let mut changed = self.refresh_status(state)?;
        changed |= self.refresh_menu()?;
        changed |= self.refresh_viewer()?;
        Ok(changed)
    }

    fn refresh_status(&mut self, state: &AppState) -> Result<bool> {
        let left_width = self.grid.cell_at(STATUS_ROW, LIST_COL)?.inner_width() as usize;
        let right_width = self.grid.cell_at(STATUS_ROW, DETAIL_COL)?.inner_width() as usize;

        let scroll_label = self.viewer.as_ref().map_or_else(String::new, |viewer| {
            format!("Scroll: {}%", (viewer.pct() * 100.0).round() as i64)
        });
        let left = render_status(STATUS_HINT, left_width, state.focus == FocusColumn::List);
        let right = render_status(&scroll_label, right_width, state.focus == FocusColumn::Detail);

        let mut changed = self.grid.update(STATUS_ROW, LIST_COL, left)?;
        changed |= self.grid.update(STATUS_ROW, DETAIL_COL, right)?;
        Ok(changed)
    }

    fn refresh_menu(&mut self) -> Result<bool> {
        let width = self.grid.cell_at(BODY_ROW, LIST_COL)?.inner_width() as usize;
        let body = self.menu.render(|entry, selected| {
            if selected {
                format!("{}", text::pad_to_width(&entry.label, width).negative())
            } else {
                entry.label.clone()
            }
        });
        Ok(self.grid.update(BODY_ROW, LIST_COL, body)?)
    }

    fn refresh_viewer(&mut self) -> Result<bool> {
        let body = self
            .viewer
            .as_ref()
            .map_or_else(String::new, ScrollView::render);
        Ok(self.grid.update(BODY_ROW, DETAIL_COL, body)?)
    }

    fn scroll_up(&mut self, state: &AppState) -> bool {
        match state.focus {
            FocusColumn::List => self.menu.up(),
            FocusColumn::Detail => self.viewer.as_mut().is_some_and(ScrollView::up),
        }
    }

    fn scroll_down(&mut self, state: &AppState) -> bool {
        match state.focus {
            FocusColumn::List => self.menu.down(),
            FocusColumn::Detail => self.viewer.as_mut().is_some_and(ScrollView::down),
        }
    }

    /// Opens the detail view for the selected talk, discarding any viewer
    /// built for a previous talk. Focus is left where it is.
    fn open_selected(&mut self) -> Result<bool> {
        let Some(talk) = self.menu.selected().and_then(|entry| entry.talk.clone()) else {
            return Ok(false);
        };
        self.open_talk = Some(talk);
        self.rebuild_viewer()?;
        Ok(true)
    }

    /// Re-wraps the open talk into a fresh viewer sized to the detail cell.
    fn rebuild_viewer(&mut self) -> Result<()> {
        let Some(talk) = &self.open_talk else {
            return Ok(());
        };
        let cell = self.grid.cell_at(BODY_ROW, DETAIL_COL)?;
        let body = detail::render_talk(talk, cell.inner_width() as usize);
        self.viewer = Some(ScrollView::new(&body, cell.inner_height() as usize));
        Ok(())
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.grid.resize(width, height);
        let menu_height = self.grid.cell_at(BODY_ROW, LIST_COL)?.inner_height() as usize;
        self.menu.set_height(menu_height);
        self.rebuild_viewer()?;
        Ok(())
    }
}

fn render_status(label: &str, width: usize, active: bool) -> String {
    if active {
        format!("{}", text::pad_to_width(label, width).black().on_green())
    } else {
        label.to_owned()
    }
}

fn handle_key_event(state: &mut AppState, ui: &mut Ui, key: KeyEvent) -> Result<KeyOutcome> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(KeyOutcome::Quit);
    }

    let moved = match key.code {
        KeyCode::Char('q') => return Ok(KeyOutcome::Quit),
        KeyCode::Up | KeyCode::Char('k') => ui.scroll_up(state),
        KeyCode::Down | KeyCode::Char('j') => ui.scroll_down(state),
        KeyCode::Left => !state.dispatch(AppCommand::FocusList).is_empty(),
        KeyCode::Right => !state.dispatch(AppCommand::FocusDetail).is_empty(),
        KeyCode::Tab => !state.dispatch(AppCommand::ToggleFocus).is_empty(),
        KeyCode::Enter => ui.open_selected()?,
        _ => false,
    };

    if !moved {
        return Ok(KeyOutcome::Idle);
    }
    if ui.refresh_all(state)? {
        Ok(KeyOutcome::Changed)
    } else {
        Ok(KeyOutcome::Idle)
    }
}

fn event_loop<W: Write>(state: &mut AppState, ui: &mut Ui, screen: &mut Screen<W>) -> Result<()> {
    ui.refresh_all(state)?;

    loop {
        if screen.repaint_requested() {
            screen.apply(&ui.grid.render())?;
        }

        match event::read().context("read terminal event")? {
            Event::Key(key) => match handle_key_event(state, ui, key)? {
                KeyOutcome::Quit => return Ok(()),
                KeyOutcome::Changed => screen.request_repaint(),
                KeyOutcome::Idle => {}
            },
            Event::Resize(width, height) => {
                ui.handle_resize(width, height)?;
                ui.refresh_all(state)?;
                screen.invalidate();
            }
            _ => {}
        }
    }
}

/// Runs the schedule browser until the user quits. `initial` is the entry
/// index to pre-select (nearest talk to now, computed by the caller).
pub fn run_app(state: &mut AppState, entries: Vec<ListEntry>, initial: usize) -> Result<()> {
    let (width, height) = terminal::size().context("query terminal size")?;
    let mut ui = Ui::new(entries, width, height)?;
    ui.menu.select(initial);

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)
        .context("enter alternate screen")?;
    let mut screen = Screen::new(stdout);

    let result = event_loop(state, &mut ui, &mut screen);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)
        .context("leave alternate screen")?;
    result
}
