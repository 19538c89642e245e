// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Selectable talk list. Day headers are separators: they render like any
//! other entry but can never hold the selection, and movement skips over
//! them. No operation wraps around; every boundary clamps.

use fahrplan_app::ListEntry;

#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<ListEntry>,
    current: usize,
    height: usize,
    top: usize,
}

impl Menu {
    pub fn new(entries: Vec<ListEntry>, height: usize) -> Self {
        let mut menu = Self {
            entries,
            current: 0,
            height: height.max(1),
            top: 0,
        };
        menu.select(0);
        menu
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Moves the selection to `index`, resolving separators forward to the
    /// next selectable entry and clamping at the last selectable entry when
    /// the index points at or beyond it. Returns whether the selection or
    /// the viewport moved; a list without selectable entries is a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(target) = self.resolve(index) else {
            return false;
        };
        let moved = target != self.current;
        self.current = target;
        let scrolled = self.follow_selection();
        moved || scrolled
    }

    pub fn up(&mut self) -> bool {
        self.step(-1)
    }

    pub fn down(&mut self) -> bool {
        self.step(1)
    }

    /// The entry under the cursor, `None` when the list has no selectable
    /// entries at all.
    pub fn selected(&self) -> Option<&ListEntry> {
        self.entries
            .get(self.current)
            .filter(|entry| !entry.is_separator())
    }

    /// Re-sizes the viewport, keeping the selection visible.
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.follow_selection();
    }

    /// Renders the visible slice, one line per entry, through the supplied
    /// per-entry renderer.
    pub fn render<F>(&self, render_entry: F) -> String
    where
        F: Fn(&ListEntry, bool) -> String,
    {
        self.entries
            .iter()
            .enumerate()
            .skip(self.top)
            .take(self.height)
            .map(|(index, entry)| render_entry(entry, index == self.current))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn resolve(&self, index: usize) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let start = index.min(self.entries.len() - 1);
        self.entries[start..]
            .iter()
            .position(|entry| !entry.is_separator())
            .map(|offset| start + offset)
            .or_else(|| {
                self.entries[..start]
                    .iter()
                    .rposition(|entry| !entry.is_separator())
            })
    }

    fn step(&mut self, delta: isize) -> bool {
        let mut index = self.current as isize + delta;
        while index >= 0 && (index as usize) < self.entries.len() {
            if !self.entries[index as usize].is_separator() {
                self.current = index as usize;
                self.follow_selection();
                return true;
            }
            index += delta;
        }
        false
    }

    fn follow_selection(&mut self) -> bool {
        let before = self.top;
        if self.current < self.top {
            self.top = self.current;
        } else if self.current >= self.top + self.height {
            self.top = self.current + 1 - self.height;
        }
        self.top != before
    }
}
