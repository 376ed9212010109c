use std::fmt;

use tracing::trace;

use crate::event::{
  Branch,
  Category,
  Event
};
use crate::schedule::{
  Day,
  Schedule
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
  All,
  Only(T)
}

impl<T> Default for Selection<T> {
  fn default() -> Self {
    Self::All
  }
}

impl<T> Selection<T> {
  pub fn is_all(&self) -> bool {
    matches!(self, Self::All)
  }

  pub fn admits(
    &self,
    value: &T
  ) -> bool
  where
    T: PartialEq
  {
    match self {
      | Self::All => true,
      | Self::Only(want) => {
        want == value
      }
    }
  }
}

impl<T: fmt::Display> fmt::Display
  for Selection<T>
{
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::All => {
        f.write_str("ALL")
      }
      | Self::Only(value) => {
        value.fmt(f)
      }
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
  pub branch:   Selection<Branch>,
  pub day:      Selection<Day>,
  pub category: Selection<Category>,
  pub query:    String
}

impl FilterState {
  pub fn searching(&self) -> bool {
    !self.query.is_empty()
  }

  pub fn has_structured_constraints(
    &self
  ) -> bool {
    !(self.branch.is_all()
      && self.day.is_all()
      && self.category.is_all())
  }

  pub fn matches(
    &self,
    event: &Event,
    schedule: &Schedule
  ) -> bool {
    let ok = if self.searching() {
      event.name_contains(&self.query)
    } else {
      self.matches_structured(
        event, schedule
      )
    };

    trace!(event = event.id, ok, "filter evaluation");
    ok
  }

  fn matches_structured(
    &self,
    event: &Event,
    schedule: &Schedule
  ) -> bool {
    if !self
      .branch
      .admits(&event.branch.name)
    {
      return false;
    }

    if let Selection::Only(day) =
      self.day
      && !event.occurs_on(
        schedule.date_of(day)
      )
    {
      return false;
    }

    self
      .category
      .admits(&event.category)
  }
}

pub fn derive<'a>(
  events: &'a [Event],
  state: &FilterState,
  schedule: &Schedule
) -> Vec<&'a Event> {
  events
    .iter()
    .filter(|event| {
      state.matches(event, schedule)
    })
    .collect()
}
