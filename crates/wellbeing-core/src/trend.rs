//! Trend series for chart views.
//!
//! The chart plots sleep quality and muscle soreness per day, oldest first,
//! over a trailing window ending today.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::bands::{Metric, Tier};
use crate::entry::{Entry, Rating};
use crate::readiness::compute_readiness;

const BAR_WIDTH: usize = 10;

/// Longest window a trend may cover, about ten years.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// One plotted day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub sleep_quality: u8,
    pub muscle_soreness: u8,
    pub mood: u8,
    pub readiness: u8,
    pub tier: Tier,
}

/// Chronological series over `[start, end]`.
#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    pub window_days: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<TrendPoint>,
}

/// Build the series for the `window_days` days ending at `today`.
///
/// Entries outside the window are skipped. Days with more than one entry
/// (possible, since the one-per-day rule is advisory) keep every point.
pub fn build_trend<'a, I>(entries: I, today: NaiveDate, window_days: u32) -> Trend
where
    I: IntoIterator<Item = &'a Entry>,
{
    let window_days = window_days.clamp(1, MAX_WINDOW_DAYS);
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .unwrap_or(NaiveDate::MIN);

    let mut in_window: Vec<&Entry> = entries
        .into_iter()
        .filter(|e| {
            let day = e.date.date();
            day >= start && day <= today
        })
        .collect();
    in_window.sort_by_key(|e| e.date);

    let points = in_window
        .into_iter()
        .map(|e| {
            let readiness = compute_readiness(e);
            TrendPoint {
                day: e.date.date(),
                sleep_quality: e.sleep_quality.get(),
                muscle_soreness: e.muscle_soreness.get(),
                mood: e.mood.get(),
                readiness: readiness.score,
                tier: readiness.tier,
            }
        })
        .collect();

    Trend {
        window_days,
        start,
        end: today,
        points,
    }
}

impl Trend {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean readiness over the plotted days, truncated.
    pub fn average_readiness(&self) -> Option<u8> {
        if self.points.is_empty() {
            return None;
        }
        let sum: u32 = self.points.iter().map(|p| u32::from(p.readiness)).sum();
        Some((sum / self.points.len() as u32) as u8)
    }

    /// Plain-text chart, one row per plotted day.
    pub fn render_text(&self) -> String {
        let mut output = format!("Verlauf (Letzte {} Tage)\n", self.window_days);
        output.push_str(&"─".repeat(56));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("Keine Einträge im Zeitraum\n");
        }

        for p in &self.points {
            output.push_str(&format!(
                "{}  S {} {:>2}  M {} {:>2}  {:>3} {}\n",
                p.day.format("%d.%m"),
                bar(p.sleep_quality),
                p.sleep_quality,
                bar(p.muscle_soreness),
                p.muscle_soreness,
                p.readiness,
                p.tier.label(),
            ));
        }

        output.push_str(&"─".repeat(56));
        output.push_str(&format!(
            "\nS {}  M {}\n",
            Metric::SleepQuality.title(),
            Metric::MuscleSoreness.title()
        ));
        output
    }
}

fn bar(value: u8) -> String {
    let filled = usize::from(value).min(usize::from(Rating::MAX));
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
