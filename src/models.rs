//! Domain models for the catalogue. These are plain data holders passed between
//! the gateway and the TUI; presentation and persistence live elsewhere.

use std::fmt;

/// Identifier assigned by the gateway when a record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonkeyId(pub i64);

impl fmt::Display for MonkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ten species the catalogue knows about, in dropdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Chimpanzee,
    Gorilla,
    Orangutan,
    Bonobo,
    Baboon,
    Macaque,
    Capuchin,
    SpiderMonkey,
    HowlerMonkey,
    Marmoset,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Chimpanzee,
        Species::Gorilla,
        Species::Orangutan,
        Species::Bonobo,
        Species::Baboon,
        Species::Macaque,
        Species::Capuchin,
        Species::SpiderMonkey,
        Species::HowlerMonkey,
        Species::Marmoset,
    ];

    /// Human-readable name, also the value stored in the database.
    pub fn label(self) -> &'static str {
        match self {
            Species::Chimpanzee => "Chimpanzee",
            Species::Gorilla => "Gorilla",
            Species::Orangutan => "Orangutan",
            Species::Bonobo => "Bonobo",
            Species::Baboon => "Baboon",
            Species::Macaque => "Macaque",
            Species::Capuchin => "Capuchin",
            Species::SpiderMonkey => "Spider Monkey",
            Species::HowlerMonkey => "Howler Monkey",
            Species::Marmoset => "Marmoset",
        }
    }

    /// Exact-match lookup by label.
    pub fn from_label(label: &str) -> Option<Species> {
        Species::ALL.into_iter().find(|species| species.label() == label)
    }

    pub fn color(self) -> TagColor {
        match self {
            Species::Chimpanzee => TagColor::Blue,
            Species::Gorilla => TagColor::Green,
            Species::Orangutan => TagColor::Orange,
            Species::Bonobo => TagColor::Purple,
            Species::Baboon => TagColor::Red,
            Species::Macaque => TagColor::Cyan,
            Species::Capuchin => TagColor::Gold,
            Species::SpiderMonkey => TagColor::Magenta,
            Species::HowlerMonkey => TagColor::Lime,
            Species::Marmoset => TagColor::Pink,
        }
    }

    /// Step through `ALL`, wrapping at both ends.
    pub fn cycle(self, offset: isize) -> Species {
        let len = Species::ALL.len() as isize;
        let index = Species::ALL
            .iter()
            .position(|species| *species == self)
            .unwrap_or(0) as isize;
        Species::ALL[(index + offset).rem_euclid(len) as usize]
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color tag attached to a species badge. The UI maps these onto the
/// terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagColor {
    Blue,
    Green,
    Orange,
    Purple,
    Red,
    Cyan,
    Gold,
    Magenta,
    Lime,
    Pink,
    Default,
}

/// Color tag for an arbitrary species name. Names outside the known ten fall
/// back to `TagColor::Default`.
pub fn species_color(name: &str) -> TagColor {
    Species::from_label(name)
        .map(Species::color)
        .unwrap_or(TagColor::Default)
}

/// Species dropdown value: either every species or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeciesFilter {
    #[default]
    All,
    Only(Species),
}

impl SpeciesFilter {
    /// The eleven dropdown options, "All Species" first.
    pub fn options() -> Vec<SpeciesFilter> {
        std::iter::once(SpeciesFilter::All)
            .chain(Species::ALL.into_iter().map(SpeciesFilter::Only))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeciesFilter::All => "All Species",
            SpeciesFilter::Only(species) => species.label(),
        }
    }

    pub fn admits(self, species: Species) -> bool {
        match self {
            SpeciesFilter::All => true,
            SpeciesFilter::Only(wanted) => wanted == species,
        }
    }
}

/// A catalogued primate as stored by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Monkey {
    /// Needed by edit and delete flows even though the cards never show it.
    pub id: MonkeyId,
    pub name: String,
    pub species: Species,
    /// Age in years.
    pub age: Option<u32>,
    pub habitat: Option<String>,
    pub favorite_food: Option<String>,
    pub diet: Option<String>,
    pub fun_fact: Option<String>,
    /// Raw text; opened with the system handler on request.
    pub image_url: Option<String>,
    pub is_endangered: bool,
}

impl Monkey {
    /// Attach an id to a set of fields, the shape the gateway hands back after
    /// a write.
    pub fn from_fields(id: MonkeyId, fields: MonkeyFields) -> Self {
        Self {
            id,
            name: fields.name,
            species: fields.species,
            age: fields.age,
            habitat: fields.habitat,
            favorite_food: fields.favorite_food,
            diet: fields.diet,
            fun_fact: fields.fun_fact,
            image_url: fields.image_url,
            is_endangered: fields.is_endangered,
        }
    }

    pub fn fields(&self) -> MonkeyFields {
        MonkeyFields {
            name: self.name.clone(),
            species: self.species,
            age: self.age,
            habitat: self.habitat.clone(),
            favorite_food: self.favorite_food.clone(),
            diet: self.diet.clone(),
            fun_fact: self.fun_fact.clone(),
            image_url: self.image_url.clone(),
            is_endangered: self.is_endangered,
        }
    }
}

/// Every writable attribute of a record. Create and update both transmit the
/// full set, so nothing reaches the gateway that the form did not validate.
#[derive(Debug, Clone, PartialEq)]
pub struct MonkeyFields {
    pub name: String,
    pub species: Species,
    pub age: Option<u32>,
    pub habitat: Option<String>,
    pub favorite_food: Option<String>,
    pub diet: Option<String>,
    pub fun_fact: Option<String>,
    pub image_url: Option<String>,
    pub is_endangered: bool,
}

impl MonkeyFields {
    /// Minimal record with only the required fields filled in.
    pub fn new(name: impl Into<String>, species: Species) -> Self {
        Self {
            name: name.into(),
            species,
            age: None,
            habitat: None,
            favorite_food: None,
            diet: None,
            fun_fact: None,
            image_url: None,
            is_endangered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_species_has_a_distinct_color() {
        let mut seen = Vec::new();
        for species in Species::ALL {
            let color = species_color(species.label());
            assert_ne!(color, TagColor::Default, "{species} fell back to default");
            assert!(!seen.contains(&color), "{species} reuses {color:?}");
            seen.push(color);
        }
    }

    #[test]
    fn unknown_species_names_use_default_color() {
        for name in ["", "chimpanzee", "Lemur", "Spider  Monkey", "all"] {
            assert_eq!(species_color(name), TagColor::Default, "{name:?}");
        }
    }

    #[test]
    fn chimpanzee_is_blue() {
        assert_eq!(species_color("Chimpanzee"), TagColor::Blue);
    }

    #[test]
    fn labels_round_trip_through_lookup() {
        for species in Species::ALL {
            assert_eq!(Species::from_label(species.label()), Some(species));
        }
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        assert_eq!(Species::Chimpanzee.cycle(-1), Species::Marmoset);
        assert_eq!(Species::Marmoset.cycle(1), Species::Chimpanzee);
        assert_eq!(Species::Gorilla.cycle(2), Species::Bonobo);
    }

    #[test]
    fn dropdown_has_eleven_options_starting_with_all() {
        let options = SpeciesFilter::options();
        assert_eq!(options.len(), 11);
        assert_eq!(options[0], SpeciesFilter::All);
        assert_eq!(options[0].label(), "All Species");
        assert_eq!(options[3], SpeciesFilter::Only(Species::Orangutan));
    }
}
