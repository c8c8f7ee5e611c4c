//! Gift cards: date-bounded discounts looked up by code.
//!
//! A code may have several rows, and rows for one code may overlap; every row
//! covering the quoted day contributes its amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use smilewidgets_core::{Cents, DateRange, DomainError, DomainResult, Entity, GiftCardId};

use crate::schedule::PriceSchedule;

pub const MAX_CODE_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: GiftCardId,
    pub code: String,
    pub amount: Cents,
    pub range: DateRange,
}

impl PriceSchedule for GiftCard {
    fn amount(&self) -> Cents {
        self.amount
    }

    fn range(&self) -> &DateRange {
        &self.range
    }
}

impl Entity for GiftCard {
    type Id = GiftCardId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl core::fmt::Display for GiftCard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} - {}", self.code, self.formatted_amount())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGiftCard {
    pub code: String,
    pub amount: Cents,
    pub range: DateRange,
}

impl NewGiftCard {
    pub fn validate(self) -> DomainResult<Self> {
        let code = self.code.trim().to_string();
        if code.is_empty() {
            return Err(DomainError::validation("gift card code cannot be empty"));
        }
        if code.chars().count() > MAX_CODE_LEN {
            return Err(DomainError::validation(format!(
                "gift card code cannot exceed {MAX_CODE_LEN} characters"
            )));
        }
        Ok(Self { code, ..self })
    }

    pub fn into_stored(self, id: GiftCardId) -> GiftCard {
        GiftCard {
            id,
            code: self.code,
            amount: self.amount,
            range: self.range,
        }
    }
}

/// Sum of the amounts of every `code` card covering `date`.
pub fn gift_card_discount(cards: &[GiftCard], code: &str, date: NaiveDate) -> Cents {
    cards
        .iter()
        .filter(|card| card.code == code && card.covers(date))
        .map(|card| card.amount)
        .sum()
}
