// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Schedule provider: downloads the frab JSON export to a cache file and
//! parses it into the domain model. The upstream format nests rooms as a
//! name-to-events map under each day; parsing never panics on malformed
//! input, it reports a typed [`ScheduleError`] instead.

use anyhow::{Context, Result, bail};
use fahrplan_app::{Day, Room, Schedule, Talk};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const DEFAULT_URL: &str = "https://fahrplan.events.ccc.de/congress/2017/Fahrplan/schedule.json";
pub const APP_NAME: &str = "fahrplan";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Data fault in the schedule source. Everything here is recoverable by
/// re-downloading; the message says so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    Malformed(String),
    NoDays,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(detail) => {
                write!(
                    f,
                    "malformed schedule data: {detail}; run `fahrplan --update` to re-download"
                )
            }
            Self::NoDays => write!(f, "schedule contains no days"),
        }
    }
}

impl std::error::Error for ScheduleError {}

#[derive(Debug, Deserialize)]
struct WireDocument {
    schedule: WireSchedule,
}

#[derive(Debug, Deserialize)]
struct WireSchedule {
    conference: WireConference,
}

#[derive(Debug, Deserialize)]
struct WireConference {
    #[serde(default)]
    days: Vec<WireDay>,
}

#[derive(Debug, Deserialize)]
struct WireDay {
    #[serde(default)]
    index: i64,
    #[serde(default)]
    date: String,
    #[serde(default)]
    rooms: BTreeMap<String, Vec<WireEvent>>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(default)]
    date: String,
    #[serde(default)]
    start: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    room: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parses a frab `schedule.json` document. Missing optional event fields
/// become blanks; events whose `date` cannot be parsed are dropped since
/// they cannot be ordered or matched against the current time.
pub fn parse(json: &str) -> Result<Schedule, ScheduleError> {
    let document: WireDocument =
        serde_json::from_str(json).map_err(|error| ScheduleError::Malformed(error.to_string()))?;

    let days: Vec<Day> = document
        .schedule
        .conference
        .days
        .into_iter()
        .map(convert_day)
        .collect();
    if days.is_empty() {
        return Err(ScheduleError::NoDays);
    }
    Ok(Schedule { days })
}

fn convert_day(day: WireDay) -> Day {
    let rooms = day
        .rooms
        .into_iter()
        .map(|(name, events)| Room {
            talks: events
                .into_iter()
                .filter_map(|event| convert_event(event, &name))
                .collect(),
            name,
        })
        .collect();
    Day {
        index: day.index,
        date: day.date,
        rooms,
    }
}

fn convert_event(event: WireEvent, room: &str) -> Option<Talk> {
    let date = OffsetDateTime::parse(&event.date, &Rfc3339).ok()?;
    let room = if event.room.is_empty() {
        room.to_owned()
    } else {
        event.room
    };
    Some(Talk {
        room,
        start: event.start,
        duration: event.duration,
        date,
        language: event.language,
        title: event.title,
        subtitle: none_if_blank(event.subtitle),
        abstract_text: event.abstract_text.unwrap_or_default(),
        description: none_if_blank(event.description),
    })
}

fn none_if_blank(field: Option<String>) -> Option<String> {
    field.filter(|text| !text.trim().is_empty())
}

/// Fetches and caches the schedule document.
#[derive(Debug, Clone)]
pub struct Loader {
    url: String,
    cache_path: PathBuf,
}

impl Loader {
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            cache_path: cache_path.into(),
        }
    }

    pub fn default_cache_path() -> Result<PathBuf> {
        let data_root = dirs::data_dir()
            .context("cannot resolve data directory; set [schedule].cache_path in the config")?;
        Ok(data_root.join(APP_NAME).join("schedule.json"))
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Loads the schedule from the cache, downloading first when no cache
    /// exists yet.
    pub fn load(&self) -> Result<Schedule> {
        if !self.cache_path.exists() {
            self.update()?;
        }
        let raw = fs::read_to_string(&self.cache_path)
            .with_context(|| format!("read schedule cache {}", self.cache_path.display()))?;
        let schedule = parse(&raw)
            .with_context(|| format!("parse schedule cache {}", self.cache_path.display()))?;
        Ok(schedule)
    }

    /// Downloads a fresh schedule into the cache file. The response is
    /// parsed before the cache is overwritten so a bad download cannot
    /// clobber a good cache.
    pub fn update(&self) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .context("build http client")?;
        let response = client
            .get(&self.url)
            .send()
            .with_context(|| format!("download schedule from {}", self.url))?;
        if !response.status().is_success() {
            bail!(
                "download schedule from {}: HTTP {}",
                self.url,
                response.status()
            );
        }
        let body = response.text().context("read schedule response body")?;
        parse(&body).with_context(|| format!("validate schedule downloaded from {}", self.url))?;

        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create cache directory {}", parent.display()))?;
        }
        fs::write(&self.cache_path, body)
            .with_context(|| format!("write schedule cache {}", self.cache_path.display()))?;
        Ok(())
    }
}
