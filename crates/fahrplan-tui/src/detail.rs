// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Formats one talk into the detail panel text: a Room/Start/Duration
//! header block, then marked sections wrapped to the panel width. Sections
//! whose source field is empty are omitted entirely.

use crossterm::style::Stylize;
use fahrplan_app::Talk;

pub fn render_talk(talk: &Talk, width: usize) -> String {
    let width = width.max(1);
    let mut sections = vec![format!(
        "Room:     {}\nStart:    {}\nDuration: {}",
        talk.room, talk.start, talk.duration
    )];

    sections.push(section("Title", &talk.title, width));
    if let Some(subtitle) = non_blank(talk.subtitle.as_deref()) {
        sections.push(section("Subtitle", subtitle, width));
    }
    sections.push(section("Abstract", &talk.abstract_text, width));
    if let Some(description) = non_blank(talk.description.as_deref()) {
        sections.push(section("Description", description, width));
    }

    sections.join("\n\n")
}

fn section(label: &str, body: &str, width: usize) -> String {
    let marker = format!("** {label} **").black().on_yellow();
    format!("{marker}\n{}", wrap_block(body, width))
}

fn wrap_block(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                textwrap::wrap(line, width).join("\n")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|text| !text.is_empty())
}
