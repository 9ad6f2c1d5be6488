//! Customer segments and the discount eligibility rule table
//!
//! The API publishes one customer list per [`Segment`]. A
//! [`DiscountRuleTable`] maps each segment to the offer its members may pick.
//! The table is plain data, so it can be replaced from configuration without
//! touching code.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Customer segment computed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    Loyalty,
    Promotional,
    FirstPurchase,
    Inactive,
    HighTicket,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::Loyalty,
        Segment::Promotional,
        Segment::FirstPurchase,
        Segment::Inactive,
        Segment::HighTicket,
    ];

    /// Path of the segment list, relative to `/clientes`
    pub fn api_path(&self) -> &'static str {
        match self {
            Segment::Loyalty => "fidelidade",
            Segment::Promotional => "promocional",
            Segment::FirstPurchase => "primeira-compra",
            Segment::Inactive => "inativos",
            Segment::HighTicket => "high-ticket",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_path())
    }
}

/// Discount type as stored by the backend's order table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Promocional,
    Fidelidade,
    Cupom,
    Parceria,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Promocional => "promocional",
            DiscountKind::Fidelidade => "fidelidade",
            DiscountKind::Cupom => "cupom",
            DiscountKind::Parceria => "parceria",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual theme of an offer card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStyle {
    #[default]
    Azul,
    Laranja,
    Roxo,
    VerdeAgua,
    Dourado,
}

/// Colors and icon used to draw an offer card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OfferTheme {
    pub color: &'static str,
    pub background: &'static str,
    pub icon: &'static str,
}

impl OfferStyle {
    pub fn theme(&self) -> OfferTheme {
        let (color, background, icon) = match self {
            OfferStyle::Roxo => ("#6a1b9a", "#f3e5f5", "👑"),
            OfferStyle::Laranja => ("#e65100", "#fff3e0", "🔥"),
            OfferStyle::Azul => ("#1565c0", "#e3f2fd", "🎟️"),
            OfferStyle::VerdeAgua => ("#00695c", "#e0f2f1", "👋"),
            OfferStyle::Dourado => ("#bf9000", "#fff8e1", "💎"),
        };
        OfferTheme {
            color,
            background,
            icon,
        }
    }
}

/// One row of the rule table: members of `segment` may pick this offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub segment: Segment,
    pub kind: DiscountKind,
    pub title: String,
    pub description: String,
    pub percent: Decimal,
    #[serde(default)]
    pub style: OfferStyle,
}

impl DiscountRule {
    pub fn new(
        segment: Segment,
        kind: DiscountKind,
        title: &str,
        description: &str,
        percent: i64,
        style: OfferStyle,
    ) -> Self {
        Self {
            segment,
            kind,
            title: title.to_string(),
            description: description.to_string(),
            percent: Decimal::from(percent),
            style,
        }
    }
}

/// Ordered segment → offer table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRuleTable {
    rules: Vec<DiscountRule>,
}

impl Default for DiscountRuleTable {
    fn default() -> Self {
        Self::new(vec![
            DiscountRule::new(
                Segment::FirstPurchase,
                DiscountKind::Promocional,
                "Primeira Compra",
                "Boas-vindas! Ganhe desconto na sua estreia.",
                10,
                OfferStyle::Azul,
            ),
            DiscountRule::new(
                Segment::Promotional,
                DiscountKind::Promocional,
                "Desconto Gamer",
                "Especial para quem compra periféricos.",
                15,
                OfferStyle::Laranja,
            ),
            DiscountRule::new(
                Segment::Loyalty,
                DiscountKind::Fidelidade,
                "Cliente VIP",
                "Recompensa por sua fidelidade.",
                20,
                OfferStyle::Roxo,
            ),
            DiscountRule::new(
                Segment::Inactive,
                DiscountKind::Cupom,
                "Que bom te ver!",
                "Estávamos com saudades. Aqui está um presente.",
                12,
                OfferStyle::VerdeAgua,
            ),
            DiscountRule::new(
                Segment::HighTicket,
                DiscountKind::Parceria,
                "Membro Elite",
                "Seu ticket médio é superior à média da loja.",
                25,
                OfferStyle::Dourado,
            ),
        ])
    }
}

impl DiscountRuleTable {
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Offers available to a user, in table order
    ///
    /// An anonymous user (`None`) gets nothing.
    pub fn eligible<'a>(&'a self, user_id: Option<i64>, lists: &SegmentLists) -> Vec<&'a DiscountRule> {
        let Some(user_id) = user_id else {
            return Vec::new();
        };
        self.rules
            .iter()
            .filter(|rule| lists.contains(rule.segment, user_id))
            .collect()
    }
}

/// Customer ids per segment, as fetched from the API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentLists {
    members: HashMap<Segment, HashSet<i64>>,
}

impl SegmentLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the members of a segment
    pub fn insert(&mut self, segment: Segment, ids: impl IntoIterator<Item = i64>) {
        self.members.insert(segment, ids.into_iter().collect());
    }

    pub fn with(mut self, segment: Segment, ids: impl IntoIterator<Item = i64>) -> Self {
        self.insert(segment, ids);
        self
    }

    pub fn contains(&self, segment: Segment, customer_id: i64) -> bool {
        self.members
            .get(&segment)
            .is_some_and(|ids| ids.contains(&customer_id))
    }

    /// Number of members in a segment (0 when not loaded)
    pub fn count(&self, segment: Segment) -> usize {
        self.members.get(&segment).map_or(0, HashSet::len)
    }
}

/// The discount applied to the cart; at most one at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDiscount {
    pub kind: DiscountKind,
    pub title: String,
    pub description: String,
    pub percent: Decimal,
}

impl ActiveDiscount {
    /// Amount taken off `subtotal`, rounded to cents
    pub fn amount_off(&self, subtotal: Decimal) -> Decimal {
        (subtotal * self.percent / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl From<&DiscountRule> for ActiveDiscount {
    fn from(rule: &DiscountRule) -> Self {
        Self {
            kind: rule.kind,
            title: rule.title.clone(),
            description: rule.description.clone(),
            percent: rule.percent,
        }
    }
}
