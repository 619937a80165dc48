use time::macros::date;

use crate::{
    person::Person,
    types::{Gender, PersonId},
};

#[allow(clippy::too_many_arguments)]
fn person(
    id: PersonId,
    first_name: &str,
    last_name: &str,
    gender: Gender,
    date_of_birth: time::Date,
    phone_number: &str,
    birth_place: &str,
    is_graduated: bool,
) -> Person {
    Person {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender,
        date_of_birth,
        phone_number: phone_number.to_string(),
        birth_place: birth_place.to_string(),
        is_graduated,
    }
}

/// The 20-record roster a fresh service starts with. The second half repeats the first.
pub fn sample_people() -> Vec<Person> {
    use Gender::{Female, Male, Other};

    vec![
        person(1, "John", "Doe", Male, date!(1995-05-23), "0587960813", "New York", true),
        person(2, "Jane", "Smith", Female, date!(1998-08-14), "0709747227", "Los Angeles", false),
        person(3, "Alice", "Johnson", Other, date!(2000-01-10), "0326881162", "Chicago", true),
        person(4, "Bob", "Brown", Male, date!(1992-12-30), "0825493289", "Houston", false),
        person(5, "Charlie", "Davis", Male, date!(1990-03-15), "0376781592", "San Francisco", true),
        person(6, "Emily", "White", Female, date!(1997-07-21), "0949972803", "Miami", false),
        person(7, "Frank", "Green", Male, date!(1985-11-02), "0852080128", "Seattle", true),
        person(8, "Grace", "Hall", Female, date!(1993-06-18), "0706578826", "Boston", false),
        person(9, "Henry", "Moore", Other, date!(1988-09-05), "0378651840", "Denver", true),
        person(10, "Isabella", "Clark", Female, date!(2001-04-12), "0823582921", "Austin", false),
        person(11, "John", "Doe", Male, date!(1995-05-23), "0587960813", "New York", true),
        person(12, "Jane", "Smith", Female, date!(1998-08-14), "0709747227", "Los Angeles", false),
        person(13, "Alice", "Johnson", Other, date!(2000-01-10), "0326881162", "Chicago", true),
        person(14, "Bob", "Brown", Male, date!(1992-12-30), "0825493289", "Houston", false),
        person(15, "Charlie", "Davis", Male, date!(1990-03-15), "0376781592", "San Francisco", true),
        person(16, "Emily", "White", Female, date!(1997-07-21), "0949972803", "Miami", false),
        person(17, "Frank", "Green", Male, date!(1985-11-02), "0852080128", "Seattle", true),
        person(18, "Grace", "Hall", Female, date!(1993-06-18), "0706578826", "Boston", false),
        person(19, "Henry", "Moore", Other, date!(1988-09-05), "0378651840", "Denver", true),
        person(20, "Isabella", "Clark", Female, date!(2001-04-12), "0823582921", "Austin", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::sample_people;
    use crate::validate::is_local_phone_number;

    #[test]
    fn sample_ids_are_one_through_twenty() {
        let ids: Vec<u32> = sample_people().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn sample_phone_numbers_are_well_formed() {
        assert!(sample_people().iter().all(|p| is_local_phone_number(&p.phone_number)));
    }
}
