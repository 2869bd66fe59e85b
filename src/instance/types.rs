//! Items, instances, and the integer width they are expressed in.

use std::fmt::{self, Debug, Display};
use std::num::ParseIntError;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::Serialize;

use super::parser::ParseErrorKind;
use crate::error::{KnapsackError, Result};

/// Integer type used for profits, weights, and the capacity.
///
/// One engine serves every width: pick `i32`/`u32` for compact instances
/// and `i64`/`u64` when sums may exceed 32 bits. Sums are accumulated in
/// `V` itself; instances whose total profit or total weight does not fit
/// the width are rejected on construction, so every subset sum fits.
pub trait Amount:
    Copy
    + Ord
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + Serialize
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + FromStr<Err = ParseIntError>
    + 'static
{
    const ZERO: Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// Lossy conversion used for ratios and scores.
    fn to_f64(self) -> f64;
}

macro_rules! impl_amount {
    ($($t:ty),*) => {
        $(
            impl Amount for $t {
                const ZERO: Self = 0;

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_amount!(i32, i64, u32, u64);

/// A single item. `id` equals its position in the owning [`Instance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<V = i64> {
    pub id: usize,
    pub profit: V,
    pub weight: V,
}

impl<V: Amount> Item<V> {
    /// Profit per unit of weight. Weightless items rank above everything.
    pub fn ratio(&self) -> f64 {
        if self.weight == V::ZERO {
            f64::INFINITY
        } else {
            self.profit.to_f64() / self.weight.to_f64()
        }
    }
}

/// Running profit and weight totals that fail once either leaves `V`.
#[derive(Debug, Default)]
pub(crate) struct Totals<V> {
    profit: V,
    weight: V,
}

impl<V: Amount> Totals<V> {
    pub(crate) fn add(&mut self, profit: V, weight: V) -> std::result::Result<(), ParseErrorKind> {
        self.profit = self
            .profit
            .checked_add(profit)
            .ok_or(ParseErrorKind::Overflow { field: "profit" })?;
        self.weight = self
            .weight
            .checked_add(weight)
            .ok_or(ParseErrorKind::Overflow { field: "weight" })?;
        Ok(())
    }
}

/// An immutable 0/1 knapsack instance.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::Instance;
///
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap();
/// assert_eq!(instance.len(), 3);
/// assert_eq!(instance.item(1).profit, 100);
/// assert_eq!(instance.capacity(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<V = i64> {
    items: Vec<Item<V>>,
    capacity: V,
}

impl<V: Amount> Instance<V> {
    /// Builds an instance from `(profit, weight)` pairs; ids follow the
    /// iteration order.
    ///
    /// Fails on a negative profit, weight, or capacity, and when the total
    /// profit or total weight does not fit `V`.
    pub fn new<I>(pairs: I, capacity: V) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        if capacity < V::ZERO {
            return Err(KnapsackError::Instance(ParseErrorKind::Negative {
                field: "capacity",
            }));
        }
        let mut items = Vec::new();
        let mut totals = Totals::default();
        for (id, (profit, weight)) in pairs.into_iter().enumerate() {
            if profit < V::ZERO {
                return Err(KnapsackError::Instance(ParseErrorKind::Negative {
                    field: "profit",
                }));
            }
            if weight < V::ZERO {
                return Err(KnapsackError::Instance(ParseErrorKind::Negative {
                    field: "weight",
                }));
            }
            totals.add(profit, weight).map_err(KnapsackError::Instance)?;
            items.push(Item { id, profit, weight });
        }
        Ok(Self { items, capacity })
    }

    /// Internal constructor for already-validated items.
    pub(crate) fn from_items(items: Vec<Item<V>>, capacity: V) -> Self {
        Self { items, capacity }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item<V>] {
        &self.items
    }

    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn item(&self, id: usize) -> &Item<V> {
        &self.items[id]
    }

    pub fn capacity(&self) -> V {
        self.capacity
    }

    /// Total profit and total weight of all items, accumulated in `f64`.
    pub fn totals(&self) -> (f64, f64) {
        self.items.iter().fold((0.0, 0.0), |(p, w), item| {
            (p + item.profit.to_f64(), w + item.weight.to_f64())
        })
    }
}

/// Writes the instance in the text format accepted by
/// [`parse_instance`](super::parse_instance).
impl<V: Amount> Display for Instance<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.items.len())?;
        for item in &self.items {
            writeln!(f, "{} {} {}", item.id, item.profit, item.weight)?;
        }
        writeln!(f, "{}", self.capacity)
    }
}
