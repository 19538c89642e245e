// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Which of the two main columns receives navigation keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusColumn {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    pub focus: FocusColumn,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            focus: FocusColumn::List,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    FocusList,
    FocusDetail,
    ToggleFocus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    FocusChanged(FocusColumn),
}

impl AppState {
    /// Applies a command and returns the events it produced. An empty vec
    /// means nothing changed and no repaint is owed.
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        let next = match command {
            AppCommand::FocusList => FocusColumn::List,
            AppCommand::FocusDetail => FocusColumn::Detail,
            AppCommand::ToggleFocus => match self.focus {
                FocusColumn::List => FocusColumn::Detail,
                FocusColumn::Detail => FocusColumn::List,
            },
        };

        if next == self.focus {
            return Vec::new();
        }
        self.focus = next;
        vec![AppEvent::FocusChanged(next)]
    }
}
