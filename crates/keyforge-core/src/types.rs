//! Data types for the KeyForge snapshot
//!
//! Cards and houses are kept as the raw JSON records the API returns so the
//! snapshot files carry every field verbatim. Only the handful of fields the
//! collector needs are read through typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{KeyforgeError, Result};

/// Sort key read from a record field.
///
/// Integers order before strings when a collection mixes both.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Integer(i64),
    Text(String),
}

impl SortKey {
    fn from_field(record: &Value, field: &str, kind: &str) -> Result<Self> {
        match record.get(field) {
            Some(Value::String(text)) => Ok(SortKey::Text(text.clone())),
            Some(Value::Number(number)) => number.as_i64().map(SortKey::Integer).ok_or_else(|| {
                KeyforgeError::Payload(format!("{kind} `{field}` is not an integer: {number}"))
            }),
            Some(other) => Err(KeyforgeError::Payload(format!(
                "{kind} `{field}` is neither a string nor an integer: {other}"
            ))),
            None => Err(KeyforgeError::Payload(format!("{kind} without `{field}`"))),
        }
    }
}

/// A card record from the deck listing's linked data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(Value);

impl Card {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Id of the expansion the card was printed in.
    pub fn expansion(&self) -> Result<u64> {
        self.0
            .get("expansion")
            .and_then(Value::as_u64)
            .ok_or_else(|| KeyforgeError::Payload("card without integer `expansion`".to_string()))
    }

    /// Whether the card is a maverick variant. `null` counts as not maverick.
    pub fn is_maverick(&self) -> Result<bool> {
        match self.0.get("is_maverick") {
            Some(Value::Bool(maverick)) => Ok(*maverick),
            Some(Value::Null) => Ok(false),
            Some(other) => Err(KeyforgeError::Payload(format!(
                "card `is_maverick` is not a boolean: {other}"
            ))),
            None => Err(KeyforgeError::Payload("card without `is_maverick`".to_string())),
        }
    }

    pub fn card_number(&self) -> Result<SortKey> {
        SortKey::from_field(&self.0, "card_number", "card")
    }
}

/// A house record from the deck listing's linked data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct House(Value);

impl House {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn id(&self) -> Result<SortKey> {
        SortKey::from_field(&self.0, "id", "house")
    }
}

/// Embedded resources returned alongside a deck listing page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Linked {
    pub cards: Vec<Card>,
    pub houses: Vec<House>,
}

/// One decoded page of `/api/decks/?links=cards`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckPage {
    #[serde(rename = "_linked")]
    pub linked: Linked,
}

/// A released card set and the cards collected for it so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    /// Display name of the set
    pub name: String,
    /// Numeric expansion id used by the API
    pub id: u64,
    /// Number of distinct non-maverick cards in the set
    pub number_of_cards: usize,
    /// Collected cards, sorted by `card_number` once complete
    pub cards: Vec<Card>,
    /// Collected houses, sorted by `id` once complete
    pub houses: Vec<House>,
}

impl Expansion {
    /// Create an expansion with empty card and house collections
    pub fn new(name: impl Into<String>, id: u64, number_of_cards: usize) -> Self {
        Self {
            name: name.into(),
            id,
            number_of_cards,
            cards: Vec::new(),
            houses: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() >= self.number_of_cards
    }

    pub fn missing(&self) -> usize {
        self.number_of_cards.saturating_sub(self.cards.len())
    }

    /// Take the cards and houses of one page that belong to this expansion.
    ///
    /// The card scan stops as soon as the target count is reached; houses are
    /// always scanned in full.
    pub fn absorb_page(&mut self, page: DeckPage) -> Result<()> {
        for card in page.linked.cards {
            if self.is_complete() {
                break;
            }
            if card.expansion()? != self.id || card.is_maverick()? {
                continue;
            }
            push_unique(&mut self.cards, card);
        }

        for house in page.linked.houses {
            push_unique(&mut self.houses, house);
        }

        Ok(())
    }

    /// Sort cards by `card_number` and houses by `id`.
    pub fn finalize(&mut self) -> Result<()> {
        sort_by_key(&mut self.cards, Card::card_number)?;
        sort_by_key(&mut self.houses, House::id)
    }
}

/// Everything a run produces, ready for the output writer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub expansions: Vec<Expansion>,
    /// Cards of every expansion in processing order
    pub cards: Vec<Card>,
    /// Houses of every expansion, each listed once
    pub houses: Vec<House>,
}

impl Snapshot {
    /// Merge a finished expansion into the global lists.
    pub fn add_expansion(&mut self, expansion: Expansion) {
        self.cards.extend(expansion.cards.iter().cloned());
        for house in &expansion.houses {
            push_unique(&mut self.houses, house.clone());
        }
        self.expansions.push(expansion);
    }
}

/// Append `item` unless an equal one is already present.
///
/// Returns whether the item was added.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}

/// Stable sort on a fallible key, failing if any record lacks one.
pub fn sort_by_key<T, F>(items: &mut Vec<T>, key: F) -> Result<()>
where
    F: Fn(&T) -> Result<SortKey>,
{
    let mut keyed = items
        .drain(..)
        .map(|item| key(&item).map(|k| (k, item)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    items.extend(keyed.into_iter().map(|(_, item)| item));
    Ok(())
}

/// The expansions the snapshot covers, in processing order
pub fn default_expansions() -> Vec<Expansion> {
    vec![
        Expansion::new("Call of the Archons", 341, 370),
        Expansion::new("Age of Ascencion", 435, 370),
        Expansion::new("Worlds Collide", 452, 405),
    ]
}
