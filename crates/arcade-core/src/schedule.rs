use std::fmt;
use std::str::FromStr;

use anyhow::{
  Context,
  anyhow
};
use chrono::NaiveDate;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
  Day1,
  Day2,
  Day3
}

impl Day {
  pub const ALL: [Self; 3] = [
    Self::Day1,
    Self::Day2,
    Self::Day3
  ];

  pub fn label(self) -> &'static str {
    match self {
      | Self::Day1 => "DAY 1",
      | Self::Day2 => "DAY 2",
      | Self::Day3 => "DAY 3"
    }
  }
}

impl fmt::Display for Day {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Day {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let token =
      s.trim().to_ascii_uppercase();
    let ordinal = token
      .strip_prefix("DAY")
      .map(str::trim_start)
      .unwrap_or(token.as_str());

    match ordinal {
      | "1" => Ok(Self::Day1),
      | "2" => Ok(Self::Day2),
      | "3" => Ok(Self::Day3),
      | _ => Err(anyhow!(
        "unknown day: {s} (expected \
         DAY 1, DAY 2 or DAY 3)"
      ))
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
  day1: NaiveDate,
  day2: NaiveDate,
  day3: NaiveDate
}

impl Default for Schedule {
  fn default() -> Self {
    Self {
      day1: builtin_date(2023, 4, 26),
      day2: builtin_date(2023, 4, 27),
      day3: builtin_date(2023, 4, 29)
    }
  }
}

impl Schedule {
  #[tracing::instrument(skip(cfg))]
  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let mut schedule = Self::default();

    if let Some(raw) =
      cfg.get("schedule.day1")
    {
      schedule.day1 =
        parse_schedule_date(&raw)
          .context(
            "invalid schedule.day1"
          )?;
    }
    if let Some(raw) =
      cfg.get("schedule.day2")
    {
      schedule.day2 =
        parse_schedule_date(&raw)
          .context(
            "invalid schedule.day2"
          )?;
    }
    if let Some(raw) =
      cfg.get("schedule.day3")
    {
      schedule.day3 =
        parse_schedule_date(&raw)
          .context(
            "invalid schedule.day3"
          )?;
    }

    tracing::debug!(
      day1 = %schedule.day1,
      day2 = %schedule.day2,
      day3 = %schedule.day3,
      "resolved fest schedule"
    );
    Ok(schedule)
  }

  pub fn date_of(
    self,
    day: Day
  ) -> NaiveDate {
    match day {
      | Day::Day1 => self.day1,
      | Day::Day2 => self.day2,
      | Day::Day3 => self.day3
    }
  }
}

fn parse_schedule_date(
  raw: &str
) -> anyhow::Result<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    "%Y-%m-%d"
  )
  .with_context(|| {
    format!(
      "expected a %Y-%m-%d date, \
       got: {raw}"
    )
  })
}

fn builtin_date(
  year: i32,
  month: u32,
  day: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or_else(|| {
    tracing::error!(year, month, day, "invalid built-in schedule date; using epoch");
    NaiveDate::default()
  })
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::{
    Day,
    Schedule
  };
  use crate::config::Config;

  #[test]
  fn default_schedule_maps_every_day()
  {
    let schedule = Schedule::default();
    assert_eq!(
      schedule
        .date_of(Day::Day1)
        .to_string(),
      "2023-04-26"
    );
    assert_eq!(
      schedule
        .date_of(Day::Day2)
        .to_string(),
      "2023-04-27"
    );
    assert_eq!(
      schedule
        .date_of(Day::Day3)
        .to_string(),
      "2023-04-29"
    );
  }

  #[test]
  fn config_keys_override_builtin_dates()
  {
    let mut cfg = Config::default();
    cfg.apply_overrides([(
      "schedule.day2".to_string(),
      "2024-03-08".to_string()
    )]);

    let schedule =
      Schedule::from_config(&cfg)
        .expect("schedule from config");
    assert_eq!(
      schedule
        .date_of(Day::Day1)
        .to_string(),
      "2023-04-26"
    );
    assert_eq!(
      schedule
        .date_of(Day::Day2)
        .to_string(),
      "2024-03-08"
    );
  }

  #[test]
  fn malformed_schedule_date_is_an_error()
  {
    let mut cfg = Config::default();
    cfg.apply_overrides([(
      "schedule.day1".to_string(),
      "april 26th".to_string()
    )]);
    assert!(
      Schedule::from_config(&cfg)
        .is_err()
    );
  }

  #[test]
  fn day_parsing_accepts_common_spellings()
  {
    assert_eq!(
      Day::from_str("DAY 2")
        .expect("parse day"),
      Day::Day2
    );
    assert_eq!(
      Day::from_str("day2")
        .expect("parse day"),
      Day::Day2
    );
    assert_eq!(
      Day::from_str("3")
        .expect("parse day"),
      Day::Day3
    );
    assert!(
      Day::from_str("DAY 4").is_err()
    );
  }
}
