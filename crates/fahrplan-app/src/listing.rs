// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{Schedule, Talk};
use crate::nearest::nearest_index;
use time::OffsetDateTime;

/// One line of the talk list: either a day header (separator, never
/// selectable) or a talk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub talk: Option<Talk>,
}

impl ListEntry {
    pub fn separator(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            talk: None,
        }
    }

    pub fn for_talk(talk: Talk) -> Self {
        let label = format!(
            "  {}: {} ({}, {})",
            talk.start,
            talk.title,
            talk.room,
            talk.language.to_uppercase()
        );
        Self {
            label,
            talk: Some(talk),
        }
    }

    pub const fn is_separator(&self) -> bool {
        self.talk.is_none()
    }

    pub fn sort_key(&self) -> Option<OffsetDateTime> {
        self.talk.as_ref().map(|talk| talk.date)
    }
}

/// Flattens a schedule into one ordered entry list: per day a `Day N`
/// separator followed by that day's talks, merged across rooms and sorted
/// ascending by start instant.
pub fn build_entries(schedule: &Schedule) -> Vec<ListEntry> {
    let mut entries = Vec::new();
    for (position, day) in schedule.days.iter().enumerate() {
        entries.push(ListEntry::separator(format!("Day {}", position + 1)));

        let mut talks: Vec<Talk> = day
            .rooms
            .iter()
            .flat_map(|room| room.talks.iter().cloned())
            .collect();
        talks.sort_by_key(|talk| talk.date);
        entries.extend(talks.into_iter().map(ListEntry::for_talk));
    }
    entries
}

/// Entry index to pre-select: the talk whose start is nearest to `now`.
/// Falls back to index 0 when the list has no talks at all.
pub fn initial_selection(entries: &[ListEntry], now: OffsetDateTime) -> usize {
    let talks: Vec<(usize, OffsetDateTime)> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.sort_key().map(|date| (index, date)))
        .collect();
    let dates: Vec<OffsetDateTime> = talks.iter().map(|(_, date)| *date).collect();

    match nearest_index(&dates, now) {
        Ok(position) => talks[position].0,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{ListEntry, build_entries, initial_selection};
    use crate::model::{Day, Room, Schedule, Talk};
    use time::OffsetDateTime;
    use time::macros::datetime;

    fn talk(title: &str, start: &str, room: &str, date: OffsetDateTime) -> Talk {
        Talk {
            room: room.to_owned(),
            start: start.to_owned(),
            duration: "00:30".to_owned(),
            date,
            language: "en".to_owned(),
            title: title.to_owned(),
            subtitle: None,
            abstract_text: "an abstract".to_owned(),
            description: None,
        }
    }

    fn two_day_schedule() -> Schedule {
        Schedule {
            days: vec![
                Day {
                    index: 1,
                    date: "2017-12-27".to_owned(),
                    rooms: vec![
                        Room {
                            name: "Saal Adams".to_owned(),
                            talks: vec![talk(
                                "Late",
                                "11:00",
                                "Saal Adams",
                                datetime!(2017-12-27 11:00 +1),
                            )],
                        },
                        Room {
                            name: "Saal Borg".to_owned(),
                            talks: vec![talk(
                                "Early",
                                "09:00",
                                "Saal Borg",
                                datetime!(2017-12-27 09:00 +1),
                            )],
                        },
                    ],
                },
                Day {
                    index: 2,
                    date: "2017-12-28".to_owned(),
                    rooms: vec![Room {
                        name: "Saal Adams".to_owned(),
                        talks: vec![talk(
                            "Tomorrow",
                            "09:00",
                            "Saal Adams",
                            datetime!(2017-12-28 09:00 +1),
                        )],
                    }],
                },
            ],
        }
    }

    #[test]
    fn entries_interleave_day_separators_and_time_sorted_talks() {
        let entries = build_entries(&two_day_schedule());

        let labels: Vec<&str> = entries.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Day 1",
                "  09:00: Early (Saal Borg, EN)",
                "  11:00: Late (Saal Adams, EN)",
                "Day 2",
                "  09:00: Tomorrow (Saal Adams, EN)",
            ],
        );
        assert!(entries[0].is_separator());
        assert!(!entries[1].is_separator());
        assert!(entries[3].is_separator());
    }

    #[test]
    fn label_upper_cases_the_language_code() {
        let entry = ListEntry::for_talk(talk(
            "Keynote",
            "10:00",
            "Saal Adams",
            datetime!(2017-12-27 10:00 +1),
        ));
        assert_eq!(entry.label, "  10:00: Keynote (Saal Adams, EN)");
    }

    #[test]
    fn initial_selection_picks_the_talk_nearest_to_now() {
        // 10:30 is 90 minutes after the 09:00 talk, 30 minutes before the
        // 11:00 talk, and almost a day before the day-2 talk.
        let entries = build_entries(&two_day_schedule());
        let now = datetime!(2017-12-27 10:30 +1);

        let index = initial_selection(&entries, now);
        assert_eq!(entries[index].label, "  11:00: Late (Saal Adams, EN)");
    }

    #[test]
    fn initial_selection_falls_back_to_zero_without_talks() {
        let entries = vec![ListEntry::separator("Day 1")];
        assert_eq!(
            initial_selection(&entries, datetime!(2017-12-27 10:30 +1)),
            0
        );
    }
}
