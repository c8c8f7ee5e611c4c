use serde::{Deserialize, Serialize};

use smilewidgets_core::{Cents, DomainError, DomainResult, Entity, ProductId};

pub const MAX_NAME_LEN: usize = 25;
pub const MAX_CODE_LEN: usize = 10;

/// A sellable product.
///
/// `price` is the base price, used on any day no `ProductPrice` covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Customer facing name.
    pub name: String,
    /// Internal facing reference, unique across products.
    pub code: String,
    pub price: Cents,
}

impl Product {
    /// Replace the base price. Schedules are untouched.
    pub fn set_base_price(&mut self, price: Cents) {
        self.price = price;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} - {}", self.name, self.code)
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub price: Cents,
}

impl NewProduct {
    /// Trim and check field constraints.
    ///
    /// Code uniqueness needs the store and is enforced there.
    pub fn validate(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        let code = self.code.trim().to_string();

        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        if code.is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        if code.chars().count() > MAX_CODE_LEN {
            return Err(DomainError::validation(format!(
                "code cannot exceed {MAX_CODE_LEN} characters"
            )));
        }

        Ok(Self {
            name,
            code,
            price: self.price,
        })
    }

    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            code: self.code,
            price: self.price,
        }
    }
}
