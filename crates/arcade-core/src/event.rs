use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::to_fest_date;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Branch {
    Core,
    Cse,
    Ise,
    Aiml,
    Cce,
    Ece,
    Eee,
    Mech,
    Civil,
    Bte,
}

impl Branch {
    pub const ALL: [Self; 10] = [
        Self::Core,
        Self::Cse,
        Self::Ise,
        Self::Aiml,
        Self::Cce,
        Self::Ece,
        Self::Eee,
        Self::Mech,
        Self::Civil,
        Self::Bte,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "CORE",
            Self::Cse => "CSE",
            Self::Ise => "ISE",
            Self::Aiml => "AIML",
            Self::Cce => "CCE",
            Self::Ece => "ECE",
            Self::Eee => "EEE",
            Self::Mech => "MECH",
            Self::Civil => "CIVIL",
            Self::Bte => "BTE",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Branch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CORE" => Ok(Self::Core),
            "CSE" => Ok(Self::Cse),
            "ISE" => Ok(Self::Ise),
            "AIML" => Ok(Self::Aiml),
            "CCE" => Ok(Self::Cce),
            "ECE" => Ok(Self::Ece),
            "EEE" => Ok(Self::Eee),
            "MECH" => Ok(Self::Mech),
            "CIVIL" => Ok(Self::Civil),
            "BTE" => Ok(Self::Bte),
            _ => Err(anyhow!(
                "unknown branch: {s} (expected one of CORE, CSE, ISE, AIML, CCE, ECE, EEE, MECH, CIVIL, BTE)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Technical,
    NonTechnical,
    Core,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Technical, Self::NonTechnical, Self::Core];

    pub fn label(self) -> &'static str {
        match self {
            Self::Technical => "TECHNICAL",
            Self::NonTechnical => "NON_TECHNICAL",
            Self::Core => "CORE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "TECHNICAL" => Ok(Self::Technical),
            "NON_TECHNICAL" => Ok(Self::NonTechnical),
            "CORE" => Ok(Self::Core),
            _ => Err(anyhow!(
                "unknown category: {s} (expected one of TECHNICAL, NON_TECHNICAL, CORE)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: Branch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub number: u32,

    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,

    pub name: String,

    pub branch: BranchRef,

    pub category: Category,

    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Event {
    pub fn new(id: u64, name: impl Into<String>, branch: Branch, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            branch: BranchRef { name: branch },
            category,
            rounds: vec![],
        }
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.rounds
            .iter()
            .any(|round| to_fest_date(round.date) == date)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Branch, Category, Event};

    #[test]
    fn catalogue_json_shape_roundtrips() {
        let raw = r#"{
            "id": 7,
            "name": "HackSprint",
            "branch": { "name": "CSE" },
            "category": "NON_TECHNICAL",
            "rounds": [{ "number": 1, "date": "2023-04-26T00:00:00Z" }]
        }"#;

        let event: Event = serde_json::from_str(raw).expect("parse event");
        assert_eq!(event.id, 7);
        assert_eq!(event.branch.name, Branch::Cse);
        assert_eq!(event.category, Category::NonTechnical);
        assert_eq!(event.rounds.len(), 1);

        let back = serde_json::to_string(&event).expect("serialize event");
        assert!(back.contains("\"CSE\""));
        assert!(back.contains("\"NON_TECHNICAL\""));
    }

    #[test]
    fn category_accepts_display_spelling() {
        assert_eq!(
            Category::from_str("non technical").expect("parse category"),
            Category::NonTechnical
        );
        assert_eq!(
            Category::from_str("NON_TECHNICAL").expect("parse category"),
            Category::NonTechnical
        );
        assert!(Category::from_str("MISC").is_err());
    }

    #[test]
    fn branch_parsing_is_case_insensitive() {
        assert_eq!(Branch::from_str("cse").expect("parse branch"), Branch::Cse);
        assert!(Branch::from_str("ARCH").is_err());
    }
}
