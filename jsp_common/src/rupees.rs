use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Sub},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";

/// Number of paise in one rupee. Razorpay expresses all amounts in paise on the wire.
const PAISE_PER_RUPEE: i64 = 100;

//--------------------------------------      Rupees       -----------------------------------------------------------
/// A whole-rupee amount. Service fees are quoted in whole rupees; [`Rupees::to_paise`] converts to the
/// gateway's minor unit at the wire boundary.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Rupees(i64);

op!(binary Rupees, Add, add);
op!(binary Rupees, Sub, sub);

impl Mul<i64> for Rupees {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in rupees: {0}")]
pub struct RupeesConversionError(String);

impl From<i64> for Rupees {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Rupees {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Rupees {}

impl TryFrom<u64> for Rupees {
    type Error = RupeesConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(RupeesConversionError(format!("Value {} is too large to convert to Rupees", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl Rupees {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The amount in the gateway's minor currency unit.
    pub fn to_paise(&self) -> i64 {
        self.0 * PAISE_PER_RUPEE
    }

    /// Converts a gateway amount in paise back into whole rupees. Errors if the amount is not a
    /// whole-rupee multiple.
    pub fn from_paise(paise: i64) -> Result<Self, RupeesConversionError> {
        if paise % PAISE_PER_RUPEE != 0 {
            return Err(RupeesConversionError(format!("{paise} paise is not a whole number of rupees")));
        }
        Ok(Self(paise / PAISE_PER_RUPEE))
    }
}
