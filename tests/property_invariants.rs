use proptest::prelude::*;
use time::{Date, Duration};

use roster::{
    core::{
        query::{self, PageRequest},
        store::{PersonStore, StoreError},
    },
    filter::PersonFilter,
    person::{Person, PersonDraft},
    types::{Gender, PersonId},
};

#[derive(Debug, Clone)]
enum Action {
    Create { gender: u8, day: u16 },
    Update { target: u8, day: u16 },
    Delete { target: u8 },
    DeleteMissing,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0u8..3, 0u16..20_000).prop_map(|(gender, day)| Action::Create { gender, day }),
        2 => (0u8..64, 0u16..20_000).prop_map(|(target, day)| Action::Update { target, day }),
        1 => (0u8..64).prop_map(|target| Action::Delete { target }),
        1 => Just(Action::DeleteMissing),
    ]
}

fn gender_from(n: u8) -> Gender {
    match n % 3 {
        0 => Gender::Male,
        1 => Gender::Female,
        _ => Gender::Other,
    }
}

fn birth_date(day: u16) -> Date {
    Date::from_calendar_date(1960, time::Month::January, 1).expect("valid date")
        + Duration::days(i64::from(day))
}

fn draft_from(gender: u8, day: u16) -> PersonDraft {
    PersonDraft {
        first_name: format!("P{day}"),
        last_name: "Prop".to_string(),
        gender: gender_from(gender),
        date_of_birth: birth_date(day),
        phone_number: "0912345678".to_string(),
        birth_place: String::new(),
        is_graduated: day % 2 == 0,
    }
}

fn ids(store: &PersonStore) -> Vec<PersonId> {
    store.all().iter().map(|p| p.id).collect()
}

fn store_from_actions(actions: Vec<Action>) -> PersonStore {
    let mut store = PersonStore::seeded();
    for action in actions {
        match action {
            Action::Create { gender, day } => {
                let expected = store.max_id() + 1;
                let created = store.insert(draft_from(gender, day)).id;
                assert_eq!(created, expected);
                assert_eq!(store.all()[0].id, expected);
            }
            Action::Update { target, day } => {
                let all = ids(&store);
                if all.is_empty() {
                    continue;
                }
                let id = all[usize::from(target) % all.len()];
                let mut person = store.find_by_id(id).expect("present").clone();
                person.date_of_birth = birth_date(day);
                let index = store.update(person).expect("update");
                assert_eq!(store.all()[index].id, id);
            }
            Action::Delete { target } => {
                let all = ids(&store);
                if all.is_empty() {
                    continue;
                }
                let id = all[usize::from(target) % all.len()];
                store.delete_by_id(id).expect("delete");
                assert_eq!(store.find_by_id(id), Err(StoreError::NotFound(id)));
            }
            Action::DeleteMissing => {
                let before = store.all().to_vec();
                let missing = store.max_id() + 1;
                assert_eq!(store.delete_by_id(missing), Err(StoreError::NotFound(missing)));
                assert_eq!(store.all(), before.as_slice());
            }
        }
    }
    store
}

fn filter_strategy() -> impl Strategy<Value = PersonFilter> {
    prop_oneof![
        (0u8..3).prop_map(|g| PersonFilter::Gender { gender: gender_from(g) }),
        (1955i32..2020).prop_map(PersonFilter::born_before),
        (1955i32..2020).prop_map(PersonFilter::born_in),
        (1955i32..2020).prop_map(PersonFilter::born_after),
        any::<bool>().prop_map(|is_graduated| PersonFilter::Graduated { is_graduated }),
    ]
}

proptest! {
    #[test]
    fn mutations_keep_ids_unique(actions in prop::collection::vec(action_strategy(), 0..120)) {
        let store = store_from_actions(actions);
        let mut seen = ids(&store);
        let len = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), len);
    }

    #[test]
    fn pages_reassemble_the_collection(
        actions in prop::collection::vec(action_strategy(), 0..60),
        page_size in 1usize..12,
    ) {
        let store = store_from_actions(actions);
        let first = query::query(&store, None, PageRequest::new(page_size, 1));
        prop_assert_eq!(first.total_pages, store.len().div_ceil(page_size));

        let mut rebuilt: Vec<Person> = Vec::new();
        for index in 1..=first.total_pages {
            let page = query::query(&store, None, PageRequest::new(page_size, index));
            prop_assert!(page.people.len() <= page_size);
            prop_assert!(!page.people.is_empty());
            rebuilt.extend(page.people);
        }
        prop_assert_eq!(rebuilt.as_slice(), store.all());

        let past_end = query::query(&store, None, PageRequest::new(page_size, first.total_pages + 1));
        prop_assert!(past_end.people.is_empty());
    }

    #[test]
    fn filtered_pages_cover_exactly_the_matches(
        actions in prop::collection::vec(action_strategy(), 0..60),
        filter in filter_strategy(),
        page_size in 1usize..9,
    ) {
        let store = store_from_actions(actions);
        let expected: Vec<Person> = store.all().iter().filter(|p| filter.matches(p)).cloned().collect();

        let first = query::query(&store, Some(&filter), PageRequest::new(page_size, 1));
        prop_assert_eq!(first.total_items, expected.len());
        prop_assert_eq!(first.total_pages, expected.len().div_ceil(page_size));

        let mut rebuilt = Vec::new();
        for index in 1..=first.total_pages {
            rebuilt.extend(query::query(&store, Some(&filter), PageRequest::new(page_size, index)).people);
        }
        prop_assert_eq!(rebuilt, expected);
    }

    #[test]
    fn oldest_is_first_minimum(actions in prop::collection::vec(action_strategy(), 0..80)) {
        let store = store_from_actions(actions);
        let page = query::oldest(&store);
        match store.all().iter().map(|p| p.date_of_birth).min() {
            None => prop_assert!(page.people.is_empty()),
            Some(min) => {
                let first = store.all().iter().find(|p| p.date_of_birth == min).cloned();
                prop_assert_eq!(page.people.first().cloned(), first);
                prop_assert_eq!(page.people.len(), 1);
            }
        }
    }
}
