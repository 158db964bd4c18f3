use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::FormError;
use crate::models::{Monkey, MonkeyFields, MonkeyId, Species};

/// Fields of the monkey form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum MonkeyField {
    #[default]
    Name,
    Species,
    Age,
    FavoriteFood,
    Habitat,
    Diet,
    FunFact,
    ImageUrl,
    Endangered,
}

impl MonkeyField {
    pub(crate) const ORDER: [MonkeyField; 9] = [
        MonkeyField::Name,
        MonkeyField::Species,
        MonkeyField::Age,
        MonkeyField::FavoriteFood,
        MonkeyField::Habitat,
        MonkeyField::Diet,
        MonkeyField::FunFact,
        MonkeyField::ImageUrl,
        MonkeyField::Endangered,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MonkeyField::Name => "Name",
            MonkeyField::Species => "Species",
            MonkeyField::Age => "Age",
            MonkeyField::FavoriteFood => "Favorite Food",
            MonkeyField::Habitat => "Habitat",
            MonkeyField::Diet => "Diet",
            MonkeyField::FunFact => "Fun Fact",
            MonkeyField::ImageUrl => "Image URL",
            MonkeyField::Endangered => "Endangered Species",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            MonkeyField::Name => "<required> e.g., Charlie",
            MonkeyField::Species => "<select species>",
            MonkeyField::Age => "Age in years",
            MonkeyField::FavoriteFood => "e.g., Bananas",
            MonkeyField::Habitat => "e.g., Tropical rainforest",
            MonkeyField::Diet => "e.g., Omnivore",
            MonkeyField::FunFact => "Share an interesting fact about this monkey...",
            MonkeyField::ImageUrl => "https://example.com/monkey-image.jpg",
            MonkeyField::Endangered => "",
        }
    }

    fn position(self) -> usize {
        MonkeyField::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

/// Modal form state shared by the add and edit flows.
#[derive(Default, Clone, Debug)]
pub(crate) struct MonkeyForm {
    pub(crate) name: String,
    pub(crate) species: Option<Species>,
    pub(crate) age: String,
    pub(crate) favorite_food: String,
    pub(crate) habitat: String,
    pub(crate) diet: String,
    pub(crate) fun_fact: String,
    pub(crate) image_url: String,
    pub(crate) is_endangered: bool,
    pub(crate) active: MonkeyField,
    pub(crate) error: Option<String>,
}

impl MonkeyForm {
    /// Pre-populate the form from an existing record when editing.
    pub(crate) fn from_monkey(monkey: &Monkey) -> Self {
        Self {
            name: monkey.name.clone(),
            species: Some(monkey.species),
            age: monkey.age.map(|age| age.to_string()).unwrap_or_default(),
            favorite_food: monkey.favorite_food.clone().unwrap_or_default(),
            habitat: monkey.habitat.clone().unwrap_or_default(),
            diet: monkey.diet.clone().unwrap_or_default(),
            fun_fact: monkey.fun_fact.clone().unwrap_or_default(),
            image_url: monkey.image_url.clone().unwrap_or_default(),
            is_endangered: monkey.is_endangered,
            active: MonkeyField::Name,
            error: None,
        }
    }

    pub(crate) fn focus(&mut self, field: MonkeyField) {
        self.active = field;
    }

    /// Move focus forward (positive) or backward, wrapping around.
    pub(crate) fn move_focus(&mut self, offset: isize) {
        let len = MonkeyField::ORDER.len() as isize;
        let next = (self.active.position() as isize + offset).rem_euclid(len);
        self.active = MonkeyField::ORDER[next as usize];
    }

    /// Step the species select. From an empty select, forward lands on the
    /// first species and backward on the last.
    pub(crate) fn cycle_species(&mut self, offset: isize) {
        self.species = Some(match self.species {
            Some(species) => species.cycle(offset),
            None if offset < 0 => Species::ALL[Species::ALL.len() - 1],
            None => Species::ALL[0],
        });
    }

    pub(crate) fn toggle_endangered(&mut self) {
        self.is_endangered = !self.is_endangered;
    }

    /// Route a typed character to the active field. Returns whether anything
    /// changed.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            MonkeyField::Species => {
                if ch == ' ' {
                    self.cycle_species(1);
                    true
                } else {
                    false
                }
            }
            MonkeyField::Endangered => {
                if ch == ' ' {
                    self.toggle_endangered();
                    true
                } else {
                    false
                }
            }
            MonkeyField::Age => {
                if ch.is_ascii_digit() {
                    self.age.push(ch);
                    true
                } else {
                    false
                }
            }
            field => match self.text_mut(field) {
                Some(value) => {
                    value.push(ch);
                    true
                }
                None => false,
            },
        }
    }

    /// Remove the last character from the active field. Clearing the species
    /// select takes it back to "nothing selected".
    pub(crate) fn backspace(&mut self) {
        match self.active {
            MonkeyField::Species => self.species = None,
            MonkeyField::Endangered => {}
            MonkeyField::Age => {
                self.age.pop();
            }
            field => {
                if let Some(value) = self.text_mut(field) {
                    value.pop();
                }
            }
        }
    }

    fn text_mut(&mut self, field: MonkeyField) -> Option<&mut String> {
        match field {
            MonkeyField::Name => Some(&mut self.name),
            MonkeyField::FavoriteFood => Some(&mut self.favorite_food),
            MonkeyField::Habitat => Some(&mut self.habitat),
            MonkeyField::Diet => Some(&mut self.diet),
            MonkeyField::FunFact => Some(&mut self.fun_fact),
            MonkeyField::ImageUrl => Some(&mut self.image_url),
            MonkeyField::Age => Some(&mut self.age),
            MonkeyField::Species | MonkeyField::Endangered => None,
        }
    }

    fn display_value(&self, field: MonkeyField) -> String {
        match field {
            MonkeyField::Name => self.name.clone(),
            MonkeyField::Species => self
                .species
                .map(|species| species.label().to_string())
                .unwrap_or_default(),
            MonkeyField::Age => self.age.clone(),
            MonkeyField::FavoriteFood => self.favorite_food.clone(),
            MonkeyField::Habitat => self.habitat.clone(),
            MonkeyField::Diet => self.diet.clone(),
            MonkeyField::FunFact => self.fun_fact.clone(),
            MonkeyField::ImageUrl => self.image_url.clone(),
            MonkeyField::Endangered => {
                if self.is_endangered {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        }
    }

    /// Apply the required-field rules and produce the payload for the gateway.
    pub(crate) fn parse_inputs(&self) -> Result<MonkeyFields, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let species = self.species.ok_or(FormError::MissingSpecies)?;
        let age_raw = self.age.trim();
        let age = if age_raw.is_empty() {
            None
        } else {
            Some(age_raw.parse::<u32>().map_err(|_| FormError::InvalidAge)?)
        };

        Ok(MonkeyFields {
            name: name.to_string(),
            species,
            age,
            habitat: optional(&self.habitat),
            favorite_food: optional(&self.favorite_food),
            diet: optional(&self.diet),
            fun_fact: optional(&self.fun_fact),
            image_url: optional(&self.image_url),
            is_endangered: self.is_endangered,
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: MonkeyField) -> Line<'static> {
        let value = self.display_value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            field.placeholder().to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ];
        if is_active && field == MonkeyField::Species {
            spans.push(Span::styled("  ◀ ▶", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }

    /// Character count of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: MonkeyField) -> usize {
        match field {
            MonkeyField::Species | MonkeyField::Endangered => 0,
            other => self.display_value(other).chars().count(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// State for the "Delete Monkey" confirmation dialog.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: MonkeyId,
    pub(crate) name: String,
}

impl ConfirmDelete {
    pub(crate) fn from(monkey: &Monkey) -> Self {
        Self {
            id: monkey.id,
            name: monkey.name.clone(),
        }
    }
}
