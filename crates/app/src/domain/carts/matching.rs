//! Line matching
//!
//! Lines are identified by product, size and color. Two lines that differ in
//! any of the three are distinct entries and are never merged.

use crate::domain::{carts::models::CartLine, products::models::ProductUuid};

/// The identity of a line within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_uuid: ProductUuid,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    #[must_use]
    pub fn new(product_uuid: ProductUuid, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_uuid,
            size,
            color,
        }
    }

    #[must_use]
    pub fn of(line: &CartLine) -> Self {
        Self::new(line.product_uuid, line.size.clone(), line.color.clone())
    }

    #[must_use]
    pub fn matches(&self, line: &CartLine) -> bool {
        self.product_uuid == line.product_uuid && self.size == line.size && self.color == line.color
    }
}

/// Index of the line matching `key`, if any.
#[must_use]
pub fn find_line(lines: &[CartLine], key: &LineKey) -> Option<usize> {
    lines.iter().position(|line| key.matches(line))
}

pub(crate) fn find_line_mut<'a>(
    lines: &'a mut [CartLine],
    key: &LineKey,
) -> Option<&'a mut CartLine> {
    lines.iter_mut().find(|line| key.matches(line))
}
