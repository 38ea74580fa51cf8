use chrono::{NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Lower bound for eligible events, fixed at the UTC day polling began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    date: NaiveDate,
    key: String,
}

impl Watermark {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            key: date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Watermark for the current UTC day.
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether an event created at `created` is on or after the watermark.
    ///
    /// Only the leading `YYYY-MM-DD` of `created` takes part, compared as a string.
    pub fn admits(&self, created: &str) -> bool {
        let day = created.get(..self.key.len()).unwrap_or(created);
        day >= self.key.as_str()
    }
}

/// Query used when none is configured: yesterday through `today`, with
/// payloads, capped at one page of 20.
pub fn default_query(today: NaiveDate) -> String {
    let yesterday = today.pred_opt().unwrap_or(today);
    format!(
        "endDate={}&startDate={}&includePayload=true&limit={DEFAULT_PAGE_LIMIT}",
        today.format(DATE_FORMAT),
        yesterday.format(DATE_FORMAT),
    )
}
