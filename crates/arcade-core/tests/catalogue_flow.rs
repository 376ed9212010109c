use arcade_core::catalogue::Catalogue;
use arcade_core::event::{Branch, Category};
use arcade_core::filter::Selection;
use arcade_core::schedule::{Day, Schedule};
use arcade_core::source;
use tempfile::tempdir;

const CATALOGUE_JSON: &str = r#"[
  {
    "id": 1,
    "name": "RoboRumble",
    "branch": { "name": "CSE" },
    "category": "TECHNICAL",
    "rounds": [{ "number": 1, "date": "2023-04-26T00:00:00Z" }]
  },
  {
    "id": 2,
    "name": "Circuit Clash",
    "branch": { "name": "ECE" },
    "category": "TECHNICAL",
    "rounds": [
      { "number": 1, "date": "2023-04-27T00:00:00Z" },
      { "number": 2, "date": "2023-04-29T00:00:00Z" }
    ]
  },
  {
    "id": 3,
    "name": "Pixel Pursuit",
    "branch": { "name": "CSE" },
    "category": "NON_TECHNICAL",
    "rounds": [{ "number": 1, "date": "2023-04-29T00:00:00Z" }]
  }
]"#;

#[test]
fn catalogue_loads_and_filters_from_disk() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("events.json");
    std::fs::write(&path, CATALOGUE_JSON).expect("write catalogue");

    let events = source::load_events(&path).expect("load events");
    assert_eq!(events.len(), 3);

    let mut catalogue = Catalogue::new(events, Schedule::default());
    assert_eq!(catalogue.visible().len(), 3);

    catalogue.set_branch(Selection::Only(Branch::Cse));
    assert_eq!(catalogue.visible().len(), 2);

    catalogue.set_category(Selection::Only(Category::NonTechnical));
    let visible = catalogue.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Pixel Pursuit");

    catalogue.set_day(Selection::Only(Day::Day3));
    assert_eq!(catalogue.visible().len(), 1);

    catalogue.search("circuit");
    let visible = catalogue.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 2);
    assert!(catalogue.state().branch.is_all());

    catalogue.reset();
    assert_eq!(catalogue.visible().len(), 3);
}

#[test]
fn missing_catalogue_degrades_to_empty() {
    let temp = tempdir().expect("tempdir");
    let events = source::load_events_or_empty(&temp.path().join("absent.json"));
    assert!(events.is_empty());

    let catalogue = Catalogue::new(events, Schedule::default());
    assert!(catalogue.visible().is_empty());
}

#[test]
fn malformed_catalogue_degrades_to_empty() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("events.json");
    std::fs::write(&path, "{ not a catalogue }").expect("write catalogue");

    assert!(source::load_events(&path).is_err());
    assert!(source::load_events_or_empty(&path).is_empty());
}
