// file: src/extractor/seniority.rs
// description: years of experience and average title level from experience sentences
// reference: date-range and title-keyword heuristics

use crate::extractor::patterns::{DATE_RANGE, FOUR_DIGIT_YEAR, TITLE_WORD, YEARS_MENTION};
use crate::models::SeniorityProfile;
use crate::reference::SeniorityLevels;
use chrono::Datelike;
use tracing::debug;

const MAX_FALLBACK_YEARS: i32 = 40;
const EARLIEST_YEAR: i32 = 1990;
const PRESENT_WORDS: &[&str] = &["present", "current", "now", "date", "to date"];

fn month_number(word: &str) -> Option<u32> {
    let month = match word {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Score for a level name or a title word; `None` when unknown.
pub fn title_score(word: &str) -> Option<f64> {
    let score = match word {
        "junior" | "entry" => 1.0,
        "mid" | "intermediate" => 2.0,
        "senior" | "lead" => 3.0,
        "staff" | "principal" | "head" => 3.5,
        "distinguished" => 3.8,
        "exec" | "fellow" | "founder" | "partner" => 4.0,
        _ => return None,
    };
    Some(score)
}

fn fallback_title_score(word: &str) -> f64 {
    let has = |needles: &[&str]| needles.iter().any(|n| word.contains(n));
    if has(&["junior", "entry", "intern", "assistant", "associate"]) {
        1.0
    } else if has(&["senior", "sr", "lead", "principal", "staff", "architect"]) {
        3.0
    } else if has(&["director", "vp", "chief", "head", "president", "founder"]) {
        4.0
    } else {
        2.0
    }
}

pub struct SeniorityExtractor<'a> {
    levels: &'a SeniorityLevels,
    current_year: i32,
}

impl<'a> SeniorityExtractor<'a> {
    pub fn new(levels: &'a SeniorityLevels) -> Self {
        Self {
            levels,
            current_year: chrono::Local::now().year(),
        }
    }

    /// Pins "present" and the fallback window to a fixed year.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Years are the larger of the summed regex estimate and the span since
    /// the earliest year mentioned. Overlapping ranges are summed, so the
    /// regex estimate can overcount.
    pub fn extract(&self, experience: &[String]) -> SeniorityProfile {
        let mut summed_years = 0.0;
        let mut total_score = 0.0;
        let mut level_count: u32 = 0;

        for line in experience {
            let line = line.to_lowercase();
            summed_years += self.range_years(&line) + mentioned_years(&line);

            for title in TITLE_WORD.find_iter(&line) {
                level_count += 1;
                total_score += self.score_title(title.as_str());
            }
        }

        let level = total_score / f64::from(level_count.max(1));
        let years = summed_years.max(f64::from(self.fallback_years(experience))).floor();

        debug!(
            "Seniority estimate: {:.0} years, level {:.2} over {} titles",
            years, level, level_count
        );
        SeniorityProfile::new(years, level, level_count)
    }

    fn range_years(&self, line: &str) -> f64 {
        DATE_RANGE
            .captures_iter(line)
            .filter_map(|caps| {
                let start_year: i32 = caps.get(2)?.as_str().parse().ok()?;
                let end = caps.get(4)?.as_str();
                let end_year: i32 = if PRESENT_WORDS.contains(&end) {
                    self.current_year
                } else {
                    end.parse().ok()?
                };
                if start_year > end_year {
                    return None;
                }

                let start_month = caps
                    .get(1)
                    .and_then(|m| month_number(m.as_str()))
                    .unwrap_or(1);
                let end_month = caps
                    .get(3)
                    .and_then(|m| month_number(m.as_str()))
                    .unwrap_or(12);

                let years = f64::from(end_year - start_year)
                    + (f64::from(end_month) - f64::from(start_month)) / 12.0;
                Some(years.max(0.0))
            })
            .sum()
    }

    fn score_title(&self, title: &str) -> f64 {
        if let Some(level) = self.levels.level_for(title) {
            return title_score(level).unwrap_or(2.0);
        }
        title_score(title).unwrap_or_else(|| fallback_title_score(title))
    }

    fn fallback_years(&self, experience: &[String]) -> i32 {
        let text = experience.join(" ");
        FOUR_DIGIT_YEAR
            .find_iter(&text)
            .filter_map(|m| m.as_str().parse::<i32>().ok())
            .filter(|y| (EARLIEST_YEAR..=self.current_year).contains(y))
            .min()
            .map(|earliest| (self.current_year - earliest).min(MAX_FALLBACK_YEARS))
            .unwrap_or(0)
    }
}

fn mentioned_years(line: &str) -> f64 {
    YEARS_MENTION
        .captures_iter(line)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .map(f64::from)
        .sum()
}
