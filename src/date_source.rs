use crate::domain::hebrew_calendar;
use crate::domain::numerals::encode_gematria;
use crate::domain::HebrewDate;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

const HEBCAL_URL: &str = "https://www.hebcal.com/etc/hdate.json?cfg=json";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that can tell what the Hebrew date is today.
pub trait DateSource: Send {
    fn today(&self) -> Result<HebrewDate>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct HebcalResponse {
    #[serde(alias = "hm")]
    hmonth: String,
    #[serde(alias = "hd")]
    hday: u32,
    #[serde(alias = "hy")]
    hyear: i64,
    #[serde(default)]
    hebrew: String,
}

impl HebcalResponse {
    fn into_date(self) -> HebrewDate {
        // "ז׳ חֶשְׁוָן תשפ״ז": the year is the last word
        let year_str = self.hebrew.split_whitespace().last().unwrap_or_default().to_string();
        HebrewDate {
            month_name: self.hmonth,
            day: self.hday,
            year: self.hyear,
            year_str,
        }
    }
}

/// Remote lookup against the Hebcal date converter. One attempt, no retry.
pub struct HebcalSource {
    url: String,
}

impl HebcalSource {
    pub fn new() -> Self {
        Self {
            url: HEBCAL_URL.to_string(),
        }
    }
}

impl Default for HebcalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DateSource for HebcalSource {
    fn today(&self) -> Result<HebrewDate> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let response: HebcalResponse = client
            .get(&self.url)
            .send()
            .context("Hebcal request failed")?
            .error_for_status()
            .context("Hebcal returned an error status")?
            .json()
            .context("Unexpected Hebcal response")?;

        Ok(response.into_date())
    }

    fn name(&self) -> &'static str {
        "hebcal"
    }
}

/// Converts the local clock (or a pinned date) with the built-in calendar.
#[derive(Debug, Clone, Default)]
pub struct LocalCalendarSource {
    fixed: Option<NaiveDate>,
}

impl LocalCalendarSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(date: NaiveDate) -> Self {
        Self { fixed: Some(date) }
    }
}

impl DateSource for LocalCalendarSource {
    fn today(&self) -> Result<HebrewDate> {
        let gregorian = self.fixed.unwrap_or_else(|| Local::now().date_naive());
        let date = hebrew_calendar::from_gregorian(gregorian);
        let year = u32::try_from(date.year).context("Hebrew year out of range")?;
        Ok(HebrewDate {
            month_name: date.month_name().to_string(),
            day: date.day,
            year: date.year,
            year_str: encode_gematria(year),
        })
    }

    fn name(&self) -> &'static str {
        "local calendar"
    }
}

/// Default chain: remote first unless offline, then the local calendar
pub fn default_sources(offline: bool) -> Vec<Box<dyn DateSource>> {
    let mut sources: Vec<Box<dyn DateSource>> = Vec::new();
    if !offline {
        sources.push(Box::new(HebcalSource::new()));
    }
    sources.push(Box::new(LocalCalendarSource::new()));
    sources
}

/// First date any source produces, None when every source fails
pub fn lookup_today(sources: &[Box<dyn DateSource>]) -> Option<HebrewDate> {
    for source in sources {
        match source.today() {
            Ok(date) => {
                log::debug!("Today's date from {}: {:?}", source.name(), date);
                return Some(date);
            }
            Err(e) => log::warn!("Date lookup via {} failed: {:#}", source.name(), e),
        }
    }
    None
}
