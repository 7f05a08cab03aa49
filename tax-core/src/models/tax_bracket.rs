use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One marginal bracket of a progressive tax table.
///
/// `base_offset` is the cumulative tax owed on all income below `min`. The
/// engine subtracts it from `taxable_income * rate`, so no lower bracket has
/// to be revisited at calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub min: Decimal,
    /// `None` means the bracket has no upper limit.
    pub max: Option<Decimal>,
    pub rate: Decimal,
    pub base_offset: Decimal,
}

impl Bracket {
    /// Whether `taxable_income` falls in this bracket.
    ///
    /// The lower bound is exclusive and the upper bound inclusive, so an
    /// income sitting exactly on a boundary belongs to the lower bracket.
    pub fn contains(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        taxable_income > self.min && self.max.is_none_or(|max| taxable_income <= max)
    }
}

/// Reasons a list of brackets is rejected as a [`BracketTable`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("first bracket must start at 0, found {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {index}: rate {rate} is outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index}: upper bound {max} does not exceed lower bound {min}")]
    EmptyRange {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    #[error("last bracket must be unbounded, found upper bound {0}")]
    BoundedLast(Decimal),

    #[error("bracket {index}: starts at {found} but previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index}: base offset is {found}, expected {expected}")]
    OffsetMismatch {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },
}

/// Ordered, validated brackets for one jurisdiction and filing status.
///
/// A table that exists is guaranteed to be non-empty, contiguous, ascending,
/// open-ended at the top and to carry consistent base offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bracket>", into = "Vec<Bracket>")]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Validates `brackets` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketTableError`] found, checked in this order:
    /// emptiness, first bracket, per-bracket rate and range, adjacency
    /// (contiguity and offsets), open upper end.
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, BracketTableError> {
        let Some(first) = brackets.first() else {
            return Err(BracketTableError::Empty);
        };
        if first.min != Decimal::ZERO {
            return Err(BracketTableError::FirstBracketNotAtZero(first.min));
        }
        if first.base_offset != Decimal::ZERO {
            return Err(BracketTableError::OffsetMismatch {
                index: 0,
                expected: Decimal::ZERO,
                found: first.base_offset,
            });
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if let Some(max) = bracket.max {
                if max <= bracket.min {
                    return Err(BracketTableError::EmptyRange {
                        index,
                        min: bracket.min,
                        max,
                    });
                }
            }
        }

        for (index, pair) in brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            let Some(lower_max) = lower.max else {
                return Err(BracketTableError::UnboundedBeforeLast { index });
            };
            if lower_max != upper.min {
                return Err(BracketTableError::NotContiguous {
                    index: index + 1,
                    expected: lower_max,
                    found: upper.min,
                });
            }
            let expected = (upper.min - lower.min) * lower.rate + lower.base_offset;
            if upper.base_offset != expected {
                return Err(BracketTableError::OffsetMismatch {
                    index: index + 1,
                    expected,
                    found: upper.base_offset,
                });
            }
        }

        if let Some(max) = brackets.last().and_then(|b| b.max) {
            return Err(BracketTableError::BoundedLast(max));
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a constructed table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bracket> {
        self.brackets.iter()
    }

    /// Finds the bracket that applies to `taxable_income`.
    ///
    /// Brackets are scanned in ascending order and the first one that
    /// [contains](Bracket::contains) the income wins. An income of zero (or
    /// anything below the first lower bound) falls back to the first bracket.
    pub fn find(
        &self,
        taxable_income: Decimal,
    ) -> &Bracket {
        self.brackets
            .iter()
            .find(|b| b.contains(taxable_income))
            .unwrap_or(&self.brackets[0])
    }
}

impl TryFrom<Vec<Bracket>> for BracketTable {
    type Error = BracketTableError;

    fn try_from(brackets: Vec<Bracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<Bracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

impl<'a> IntoIterator for &'a BracketTable {
    type Item = &'a Bracket;
    type IntoIter = std::slice::Iter<'a, Bracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.brackets.iter()
    }
}
