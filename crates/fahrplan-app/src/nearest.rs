// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

/// Nearest-timestamp lookup was asked to pick from an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTimeline;

impl std::fmt::Display for EmptyTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nearest-timestamp lookup on an empty timeline")
    }
}

impl std::error::Error for EmptyTimeline {}

/// Returns the index of the timestamp with the smallest absolute distance
/// to `now`. The input may be unsorted; ties resolve to the first such
/// index in input order.
pub fn nearest_index(
    timestamps: &[OffsetDateTime],
    now: OffsetDateTime,
) -> Result<usize, EmptyTimeline> {
    let mut best: Option<(usize, time::Duration)> = None;
    for (index, stamp) in timestamps.iter().enumerate() {
        let distance = (*stamp - now).abs();
        match best {
            Some((_, nearest)) if distance >= nearest => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index).ok_or(EmptyTimeline)
}
