// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fake data for the demos: people with a state, an age group, a pet, and a score.

use kurbo::Size;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_rect_pack::{Hierarchy, Weighted};

/// States people are drawn from.
pub const STATES: [&str; 8] = [
    "Washington",
    "California",
    "Oregon",
    "Nevada",
    "New York",
    "Georgia",
    "Massachusetts",
    "Idaho",
];

/// Age buckets.
pub const AGE_GROUPS: [&str; 3] = ["0-18", "18-62", "62+"];

/// Pets.
pub const PETS: [&str; 4] = ["Cat", "Dog", "Bird", "Potato"];

/// One generated record.
#[derive(Clone, Debug)]
pub struct Person {
    /// Display name.
    pub name: String,
    /// Sort weight in `0..1`.
    pub value: f64,
    /// Heat value in `0..100`, used to pick a glyph.
    pub color: f64,
    /// Home state.
    pub state: &'static str,
    /// Age bucket.
    pub age_group: &'static str,
    /// Pet.
    pub pet: &'static str,
}

/// Payload stored in the demo hierarchies.
#[derive(Clone, Debug)]
pub enum Datum {
    /// A group and its label.
    Group(String),
    /// A leaf record.
    Person(Person),
}

impl Datum {
    /// Label for groups, name for people.
    pub fn label(&self) -> &str {
        match self {
            Self::Group(name) => name,
            Self::Person(p) => &p.name,
        }
    }

    /// The record behind a leaf.
    pub fn person(&self) -> Option<&Person> {
        match self {
            Self::Person(p) => Some(p),
            Self::Group(_) => None,
        }
    }
}

impl Weighted for Datum {
    fn value(&self) -> f64 {
        match self {
            Self::Group(_) => 0.0,
            Self::Person(p) => p.value,
        }
    }
}

/// Generate `count` people from a fixed seed, ascending by value.
pub fn fake_people(count: usize, seed: u64) -> Vec<Person> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut people: Vec<Person> = (0..count)
        .map(|id| Person {
            name: format!("individual-{id}"),
            value: rng.random(),
            color: rng.random_range(0.0..100.0),
            state: STATES[rng.random_range(0..STATES.len())],
            age_group: AGE_GROUPS[rng.random_range(0..AGE_GROUPS.len())],
            pet: PETS[rng.random_range(0..PETS.len())],
        })
        .collect();
    people.sort_by(|a, b| a.value.total_cmp(&b.value));
    people
}

/// Group people by the given fields, one hierarchy level per field.
pub fn group_people(
    people: Vec<Person>,
    fields: &[fn(&Person) -> &'static str],
) -> Hierarchy<Datum> {
    type Key = dyn Fn(&Datum) -> &'static str;
    let keys: Vec<Box<Key>> = fields
        .iter()
        .map(|field| {
            let field = *field;
            Box::new(move |d: &Datum| d.person().map_or("", field)) as Box<Key>
        })
        .collect();
    let keys: Vec<&Key> = keys.iter().map(|k| k.as_ref()).collect();
    Hierarchy::grouped(
        Datum::Group("root".into()),
        people.into_iter().map(Datum::Person),
        &keys,
        |name| Datum::Group((*name).into()),
    )
}

/// Map a heat value in `0..100` to a glyph, coldest first.
pub fn heat_glyph(color: f64) -> char {
    const RAMP: [char; 6] = ['.', ':', '-', '=', '+', '#'];
    let step = (color / 20.0).clamp(0.0, 5.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The step is clamped to the ramp's index range."
    )]
    let idx = step as usize;
    RAMP[idx]
}

/// Aspect ratio in the packer's sense: height over width.
pub fn aspect_ratio_of(bounds: Size) -> f64 {
    bounds.height / bounds.width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_people_are_sorted_and_repeatable() {
        let a = fake_people(50, 7);
        let b = fake_people(50, 7);
        assert_eq!(a.len(), 50);
        assert!(a.windows(2).all(|w| w[0].value <= w[1].value));
        assert!(a.iter().zip(&b).all(|(x, y)| x.name == y.name));
    }

    #[test]
    fn grouping_by_state_and_age() {
        let people = fake_people(200, 1);
        let tree = group_people(people, &[|p| p.state, |p| p.age_group]);
        assert_eq!(tree.leaves().count(), 200);
        assert!(tree.children_of(tree.root()).len() <= STATES.len());
        assert_eq!(tree.validate(), Ok(()));
        for state in tree.children_of(tree.root()) {
            assert!(tree.children_of(*state).len() <= AGE_GROUPS.len());
        }
    }

    #[test]
    fn aspect_ratio_is_height_over_width() {
        assert_eq!(aspect_ratio_of(Size::new(40.0, 20.0)), 0.5);
        assert_eq!(aspect_ratio_of(Size::new(20.0, 40.0)), 2.0);
    }

    #[test]
    fn glyph_ramp_is_clamped() {
        assert_eq!(heat_glyph(-5.0), '.');
        assert_eq!(heat_glyph(50.0), '-');
        assert_eq!(heat_glyph(60.0), '=');
        assert_eq!(heat_glyph(100.0), '#');
    }
}
