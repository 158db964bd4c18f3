use crate::models::{Monkey, SpeciesFilter};

/// Whether a record passes both the species dropdown and the search term. The
/// term is matched case-insensitively against the name and the species label;
/// a blank term matches everything.
pub fn matches(monkey: &Monkey, term: &str, species: SpeciesFilter) -> bool {
    if !species.admits(monkey.species) {
        return false;
    }
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    monkey.name.to_lowercase().contains(&needle)
        || monkey.species.label().to_lowercase().contains(&needle)
}

/// Visible subset of `monkeys`, in their original order.
pub fn filter_monkeys(monkeys: &[Monkey], term: &str, species: SpeciesFilter) -> Vec<Monkey> {
    monkeys
        .iter()
        .filter(|monkey| matches(monkey, term, species))
        .cloned()
        .collect()
}
