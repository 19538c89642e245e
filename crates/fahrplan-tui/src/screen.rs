// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Diff-based frame painter. Owns the output stream exclusively; every
//! other component hands its content to the grid and the event loop asks
//! the screen to paint the composed frame at most once per input cycle.

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

#[derive(Debug)]
pub struct Screen<W: Write> {
    out: W,
    previous: Vec<String>,
    repaint_requested: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: Vec::new(),
            // the first frame always paints in full
            repaint_requested: true,
        }
    }

    /// Marks the current frame stale. Multiple requests before the next
    /// `apply` coalesce into a single paint.
    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    pub const fn repaint_requested(&self) -> bool {
        self.repaint_requested
    }

    /// Forgets the previously painted frame so the next `apply` repaints
    /// every line. Used after a terminal resize, when the old content on
    /// screen can no longer be trusted.
    pub fn invalidate(&mut self) {
        self.previous.clear();
        self.repaint_requested = true;
    }

    /// Paints `frame`, rewriting only the lines that differ from the
    /// previous frame at the same index and clearing any trailing lines
    /// the new frame no longer covers. Flushes once.
    pub fn apply(&mut self, frame: &str) -> Result<()> {
        let lines: Vec<String> = frame.split('\n').map(str::to_owned).collect();

        for (index, line) in lines.iter().enumerate() {
            if self.previous.get(index) == Some(line) {
                continue;
            }
            queue!(
                self.out,
                MoveTo(0, index as u16),
                Clear(ClearType::UntilNewLine),
                Print(line),
            )
            .context("queue line repaint")?;
        }
        for index in lines.len()..self.previous.len() {
            queue!(
                self.out,
                MoveTo(0, index as u16),
                Clear(ClearType::UntilNewLine),
            )
            .context("queue trailing line clear")?;
        }

        self.out.flush().context("flush frame")?;
        self.previous = lines;
        self.repaint_requested = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn take(&self) -> String {
            let bytes = std::mem::take(&mut *self.0.borrow_mut());
            String::from_utf8(bytes).expect("terminal output is utf-8")
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_apply_paints_every_line() {
        let buffer = SharedBuffer::default();
        let mut screen = Screen::new(buffer.clone());

        screen.apply("alpha\nbeta").expect("paint succeeds");
        let painted = buffer.take();
        assert!(painted.contains("alpha"));
        assert!(painted.contains("beta"));
        assert!(!screen.repaint_requested());
    }

    #[test]
    fn unchanged_lines_are_not_rewritten() {
        let buffer = SharedBuffer::default();
        let mut screen = Screen::new(buffer.clone());

        screen.apply("alpha\nbeta").expect("paint succeeds");
        buffer.take();

        screen.apply("alpha\ngamma").expect("paint succeeds");
        let painted = buffer.take();
        assert!(!painted.contains("alpha"));
        assert!(painted.contains("gamma"));
    }

    #[test]
    fn identical_frames_write_nothing() {
        let buffer = SharedBuffer::default();
        let mut screen = Screen::new(buffer.clone());

        screen.apply("alpha\nbeta").expect("paint succeeds");
        buffer.take();

        screen.apply("alpha\nbeta").expect("paint succeeds");
        assert_eq!(buffer.take(), "");
    }

    #[test]
    fn shrinking_frames_clear_the_trailing_lines() {
        let buffer = SharedBuffer::default();
        let mut screen = Screen::new(buffer.clone());

        screen.apply("alpha\nbeta\ngamma").expect("paint succeeds");
        buffer.take();

        screen.apply("alpha").expect("paint succeeds");
        let painted = buffer.take();
        // rows 1 and 2 get cursor moves plus clears, but no new text
        assert!(!painted.contains("beta"));
        assert!(!painted.contains("gamma"));
        assert!(painted.contains("\u{1b}[2;1H"));
        assert!(painted.contains("\u{1b}[3;1H"));
    }

    #[test]
    fn invalidate_forces_a_full_repaint() {
        let buffer = SharedBuffer::default();
        let mut screen = Screen::new(buffer.clone());

        screen.apply("alpha\nbeta").expect("paint succeeds");
        buffer.take();

        screen.invalidate();
        assert!(screen.repaint_requested());
        screen.apply("alpha\nbeta").expect("paint succeeds");
        let painted = buffer.take();
        assert!(painted.contains("alpha"));
        assert!(painted.contains("beta"));
    }

    #[test]
    fn repaint_requests_coalesce_until_apply() {
        let buffer = SharedBuffer::default();
        let mut screen = Screen::new(buffer.clone());
        screen.apply("x").expect("paint succeeds");

        screen.request_repaint();
        screen.request_repaint();
        assert!(screen.repaint_requested());

        screen.apply("x").expect("paint succeeds");
        assert!(!screen.repaint_requested());
    }
}
