use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;
use serde::Deserialize;

const TIMEZONE_CONFIG_FILE: &str =
  "arcade-time.toml";
const TIMEZONE_ENV_VAR: &str =
  "ARCADE_TIMEZONE";
const TIMEZONE_CONFIG_ENV_VAR: &str =
  "ARCADE_TIME_CONFIG";
const DEFAULT_FEST_TIMEZONE: Tz =
  chrono_tz::Asia::Kolkata;

static FEST_TZ: OnceLock<Tz> =
  OnceLock::new();

#[derive(Debug, Deserialize)]
struct TimezoneConfig {
  timezone: Option<String>,
  time:     Option<TimezoneSection>
}

#[derive(Debug, Deserialize)]
struct TimezoneSection {
  timezone: Option<String>
}

pub fn fest_timezone() -> &'static Tz {
  FEST_TZ.get_or_init(
    resolve_fest_timezone
  )
}

#[must_use]
pub fn to_fest_date(
  dt: DateTime<Utc>
) -> NaiveDate {
  dt.with_timezone(fest_timezone())
    .date_naive()
}

#[must_use]
pub fn format_fest_date(
  dt: DateTime<Utc>
) -> String {
  to_fest_date(dt)
    .format("%Y-%m-%d")
    .to_string()
}

fn resolve_fest_timezone() -> Tz {
  for (origin, raw) in
    candidate_timezones()
  {
    match raw.trim().parse::<Tz>() {
      | Ok(tz) => {
        tracing::info!(
          origin,
          timezone = %tz,
          "fest timezone configured"
        );
        return tz;
      }
      | Err(err) => {
        tracing::warn!(
          origin,
          timezone = %raw,
          error = %err,
          "ignoring unusable timezone"
        );
      }
    }
  }

  tracing::info!(
    timezone = %DEFAULT_FEST_TIMEZONE,
    "fest timezone defaulted"
  );
  DEFAULT_FEST_TIMEZONE
}

fn candidate_timezones()
-> Vec<(&'static str, String)> {
  let mut found = Vec::new();

  if let Ok(raw) =
    std::env::var(TIMEZONE_ENV_VAR)
    && !raw.trim().is_empty()
  {
    found.push(("environment", raw));
  }
  if let Some(raw) =
    timezone_file_entry()
  {
    found.push(("config file", raw));
  }

  found
}

fn timezone_file_entry()
-> Option<String> {
  let path = timezone_config_path()?;
  if !path.is_file() {
    return None;
  }

  let text = match fs::read_to_string(
    &path
  ) {
    | Ok(text) => text,
    | Err(err) => {
      tracing::warn!(
        file = %path.display(),
        error = %err,
        "unreadable timezone config"
      );
      return None;
    }
  };

  let parsed: TimezoneConfig =
    match toml::from_str(&text) {
      | Ok(parsed) => parsed,
      | Err(err) => {
        tracing::warn!(
          file = %path.display(),
          error = %err,
          "unparseable timezone config"
        );
        return None;
      }
    };

  let entry =
    parsed.timezone.or_else(|| {
      parsed.time?.timezone
    });
  if entry.is_none() {
    tracing::warn!(
      file = %path.display(),
      "timezone config has no timezone key"
    );
  }
  entry
}

fn timezone_config_path()
-> Option<PathBuf> {
  match std::env::var(
    TIMEZONE_CONFIG_ENV_VAR
  ) {
    | Ok(raw)
      if !raw.trim().is_empty() =>
    {
      Some(PathBuf::from(raw.trim()))
    }
    | _ => Some(
      std::env::current_dir()
        .ok()?
        .join(TIMEZONE_CONFIG_FILE)
    )
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::{
    format_fest_date,
    to_fest_date
  };

  #[test]
  fn buckets_utc_instants_into_fest_days()
  {
    let late = Utc
      .with_ymd_and_hms(
        2023, 4, 26, 20, 30, 0
      )
      .single()
      .expect("valid instant");
    assert_eq!(
      to_fest_date(late).to_string(),
      "2023-04-27"
    );

    let midnight = Utc
      .with_ymd_and_hms(
        2023, 4, 27, 0, 0, 0
      )
      .single()
      .expect("valid instant");
    assert_eq!(
      to_fest_date(midnight)
        .to_string(),
      "2023-04-27"
    );
  }

  #[test]
  fn formats_fest_dates() {
    let instant = Utc
      .with_ymd_and_hms(
        2023, 4, 29, 12, 0, 0
      )
      .single()
      .expect("valid instant");
    assert_eq!(
      format_fest_date(instant),
      "2023-04-29"
    );
  }
}
