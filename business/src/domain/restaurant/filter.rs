use std::collections::HashSet;

use crate::domain::recommendation::model::UserRequest;

use super::model::Restaurant;

/// Restaurants that survived city and price filtering for one request.
///
/// Borrowed from the store snapshot and dropped when the request ends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateSet<'a> {
    members: Vec<&'a Restaurant>,
}

impl<'a> CandidateSet<'a> {
    pub fn new(members: Vec<&'a Restaurant>) -> Self {
        Self { members }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Restaurant> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a Restaurant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Case-insensitive substring match against either the city or the location
/// column. The dataset mixes areas and cities between those two columns.
pub fn matches_city(restaurant: &Restaurant, city: &str) -> bool {
    let needle = city.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    restaurant.city.to_lowercase().contains(&needle)
        || restaurant.location.to_lowercase().contains(&needle)
}

pub fn within_budget(restaurant: &Restaurant, max_price: u32) -> bool {
    restaurant.price_for_two <= max_price
}

/// Applies the city and price predicates and collapses repeated
/// (name, location) listings, keeping the first one.
///
/// Accepts any iterator of restaurants so an existing candidate set can be
/// filtered again; the result is then unchanged.
pub fn filter<'a, I>(restaurants: I, request: &UserRequest) -> CandidateSet<'a>
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let mut seen = HashSet::new();
    let members = restaurants
        .into_iter()
        .filter(|r| matches_city(r, request.city()))
        .filter(|r| within_budget(r, request.max_price()))
        .filter(|r| seen.insert((r.name.to_lowercase(), r.location.to_lowercase())))
        .collect();

    CandidateSet::new(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::model::fixtures::restaurant_in;
    use proptest::prelude::*;

    fn request(city: &str, max_price: u32) -> UserRequest {
        UserRequest::new(city, max_price, 10).unwrap()
    }

    fn dataset() -> Vec<Restaurant> {
        vec![
            restaurant_in(1, "Jalsa", "Bangalore", "Banashankari", 4.1, 775, 800),
            restaurant_in(2, "Spice Elephant", "Bangalore", "Banashankari", 4.1, 787, 800),
            restaurant_in(3, "Cafe Mocha", "Banashankari", "Banashankari 2nd Stage", 3.6, 88, 300),
            restaurant_in(4, "Truffles", "Koramangala", "Koramangala 7th Block", 4.7, 14726, 900),
            restaurant_in(5, "Addhuri", "Bangalore", "Basavanagudi", 3.7, 166, 650),
        ]
    }

    #[test]
    fn should_match_city_against_both_location_fields() {
        let data = dataset();

        let candidates = filter(&data, &request("banashankari", 1000));

        let names: Vec<_> = candidates.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Jalsa", "Spice Elephant", "Cafe Mocha"]);
    }

    #[test]
    fn should_match_city_as_substring() {
        let data = dataset();

        let candidates = filter(&data, &request("Koramangala", 1000));

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.as_slice()[0].name, "Truffles");
    }

    #[test]
    fn should_apply_price_inclusively() {
        let data = dataset();

        let candidates = filter(&data, &request("Banashankari", 800));
        assert_eq!(candidates.len(), 3);

        let candidates = filter(&data, &request("Banashankari", 799));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn should_return_empty_set_for_unknown_city() {
        let data = dataset();

        let candidates = filter(&data, &request("Nowhere", 5000));

        assert!(candidates.is_empty());
    }

    #[test]
    fn should_collapse_duplicate_listings() {
        let mut data = dataset();
        data.push(restaurant_in(6, "JALSA", "Bangalore", "banashankari", 4.0, 10, 700));

        let candidates = filter(&data, &request("Banashankari", 1000));

        assert_eq!(candidates.iter().filter(|r| r.name.eq_ignore_ascii_case("jalsa")).count(), 1);
        assert_eq!(candidates.as_slice()[0].id.value(), 1);
    }

    fn arb_restaurant() -> impl Strategy<Value = Restaurant> {
        (
            0u64..1000,
            prop::sample::select(vec!["Jalsa", "Empire", "Onesta", "Truffles"]),
            prop::sample::select(vec!["Bangalore", "Banashankari", "Koramangala"]),
            prop::sample::select(vec!["BTM", "Indiranagar", "Banashankari"]),
            0u32..2000,
        )
            .prop_map(|(id, name, city, location, price)| {
                restaurant_in(id, name, city, location, 4.0, 10, price)
            })
    }

    proptest! {
        #[test]
        fn should_be_idempotent(
            data in prop::collection::vec(arb_restaurant(), 0..40),
            city in prop::sample::select(vec!["bangalore", "Banashankari", "BTM", "nowhere"]),
            max_price in 1u32..2000,
        ) {
            let req = request(city, max_price);
            let once = filter(&data, &req);
            let twice = filter(once.iter(), &req);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn should_only_return_members_satisfying_both_predicates(
            data in prop::collection::vec(arb_restaurant(), 0..40),
            max_price in 1u32..2000,
        ) {
            let req = request("Banashankari", max_price);
            for r in filter(&data, &req).iter() {
                prop_assert!(matches_city(r, "Banashankari"));
                prop_assert!(r.price_for_two <= max_price);
            }
        }
    }
}
