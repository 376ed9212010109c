use tracing::debug;

use crate::event::{Branch, Category, Event};
use crate::filter::{FilterState, Selection};
use crate::schedule::{Day, Schedule};

#[derive(Debug, Clone)]
pub struct Catalogue {
    events: Vec<Event>,
    schedule: Schedule,
    state: FilterState,
    visible: Vec<usize>,
}

impl Catalogue {
    pub fn new(events: Vec<Event>, schedule: Schedule) -> Self {
        let mut catalogue = Self {
            events,
            schedule,
            state: FilterState::default(),
            visible: vec![],
        };
        catalogue.recompute();
        catalogue
    }

    pub fn set_branch(&mut self, branch: Selection<Branch>) {
        self.state.branch = branch;
        self.recompute();
    }

    pub fn set_day(&mut self, day: Selection<Day>) {
        self.state.day = day;
        self.recompute();
    }

    pub fn set_category(&mut self, category: Selection<Category>) {
        self.state.category = category;
        self.recompute();
    }

    pub fn search(&mut self, query: &str) {
        self.state.query = query.to_string();
        self.state.branch = Selection::All;
        self.state.day = Selection::All;
        self.state.category = Selection::All;
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
        self.recompute();
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn visible(&self) -> Vec<&Event> {
        self.visible
            .iter()
            .filter_map(|&idx| self.events.get(idx))
            .collect()
    }

    fn recompute(&mut self) {
        let visible: Vec<usize> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, event)| self.state.matches(event, &self.schedule))
            .map(|(idx, _)| idx)
            .collect();

        debug!(
            total = self.events.len(),
            visible = visible.len(),
            searching = self.state.searching(),
            "recomputed visible list"
        );
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::Catalogue;
    use crate::event::{Branch, Category, Event};
    use crate::filter::Selection;
    use crate::schedule::Schedule;

    fn sample_catalogue() -> Catalogue {
        let events = vec![
            Event::new(1, "Hack1", Branch::Cse, Category::Technical),
            Event::new(2, "Hack2", Branch::Ece, Category::Technical),
        ];
        Catalogue::new(events, Schedule::default())
    }

    fn visible_names(catalogue: &Catalogue) -> Vec<String> {
        catalogue
            .visible()
            .iter()
            .map(|event| event.name.clone())
            .collect()
    }

    #[test]
    fn branch_selection_narrows_the_catalogue() {
        let mut catalogue = sample_catalogue();
        catalogue.set_branch(Selection::Only(Branch::Cse));
        assert_eq!(visible_names(&catalogue), vec!["Hack1"]);
    }

    #[test]
    fn typing_a_query_abandons_structured_selections() {
        let mut catalogue = sample_catalogue();
        catalogue.set_branch(Selection::Only(Branch::Cse));
        catalogue.search("hack2");

        assert_eq!(visible_names(&catalogue), vec!["Hack2"]);
        assert!(catalogue.state().branch.is_all());
        assert!(catalogue.state().day.is_all());
        assert!(catalogue.state().category.is_all());
    }

    #[test]
    fn clearing_the_query_restores_the_full_collection() {
        let mut catalogue = sample_catalogue();
        catalogue.search("hack2");
        catalogue.search("");

        assert_eq!(visible_names(&catalogue), vec!["Hack1", "Hack2"]);
        assert!(!catalogue.state().searching());
    }

    #[test]
    fn structured_setters_do_not_clear_an_active_query() {
        let mut catalogue = sample_catalogue();
        catalogue.search("hack1");
        catalogue.set_branch(Selection::Only(Branch::Ece));

        assert_eq!(catalogue.state().query, "hack1");
        assert_eq!(visible_names(&catalogue), vec!["Hack1"]);
    }

    #[test]
    fn whitespace_queries_are_matched_literally() {
        let mut catalogue = sample_catalogue();
        catalogue.search("   ");

        assert_eq!(catalogue.state().query, "   ");
        assert!(catalogue.visible().is_empty());
    }

    #[test]
    fn reset_restores_defaults_after_any_sequence() {
        let mut catalogue = sample_catalogue();
        catalogue.set_branch(Selection::Only(Branch::Cse));
        catalogue.set_category(Selection::Only(Category::Technical));
        catalogue.search("nothing matches this");
        catalogue.reset();

        assert_eq!(visible_names(&catalogue), vec!["Hack1", "Hack2"]);

        catalogue.reset();
        assert_eq!(visible_names(&catalogue), vec!["Hack1", "Hack2"]);
    }

    #[test]
    fn empty_collection_stays_empty_without_error() {
        let mut catalogue = Catalogue::new(vec![], Schedule::default());
        assert!(catalogue.visible().is_empty());

        catalogue.set_category(Selection::Only(Category::NonTechnical));
        assert!(catalogue.visible().is_empty());
    }
}
