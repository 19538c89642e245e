// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Scrollable viewport over a block of pre-wrapped text. A fresh instance
//! is built every time a talk is opened; scrolling clamps at both ends.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollView {
    lines: Vec<String>,
    height: usize,
    top: usize,
}

impl ScrollView {
    pub fn new(text: &str, height: usize) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
            height: height.max(1),
            top: 0,
        }
    }

    /// Scrolls one line towards the top. Returns whether the offset moved;
    /// a clamped no-op at the boundary raises no update.
    pub fn up(&mut self) -> bool {
        if self.top == 0 {
            return false;
        }
        self.top -= 1;
        true
    }

    pub fn down(&mut self) -> bool {
        if self.top >= self.max_offset() {
            return false;
        }
        self.top += 1;
        true
    }

    /// Scroll completion in `[0.0, 1.0]`; 0 when the content fits entirely.
    pub fn pct(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            0.0
        } else {
            self.top as f64 / max as f64
        }
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.top = self.top.min(self.max_offset());
    }

    /// The visible slice of the content.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .skip(self.top)
            .take(self.height)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }
}
