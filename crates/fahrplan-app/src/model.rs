// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

/// One talk slot as published by the schedule. Produced once by the loader
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talk {
    pub room: String,
    /// Wall-clock start, `HH:MM`, shown verbatim.
    pub start: String,
    /// Duration string as published, e.g. `00:30`.
    pub duration: String,
    /// Absolute start instant, used for ordering and nearest-now selection.
    pub date: OffsetDateTime,
    pub language: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub abstract_text: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub talks: Vec<Talk>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub index: i64,
    /// Calendar date as published, e.g. `2017-12-27`.
    pub date: String,
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub days: Vec<Day>,
}

impl Schedule {
    pub fn talk_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|day| &day.rooms)
            .map(|room| room.talks.len())
            .sum()
    }
}
