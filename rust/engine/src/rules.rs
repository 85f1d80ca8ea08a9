use serde::{Deserialize, Serialize};

use crate::errors::ExchangeError;

/// Most cards a seat may replace in one exchange window.
pub const EXCHANGE_BUDGET: u8 = 2;

/// Private-hand slots a seat has asked to replace, already checked against
/// the exchange rules. The round runtime only accepts this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedExchange {
    slots: Vec<usize>,
}

impl ValidatedExchange {
    /// An exchange that keeps both cards.
    pub fn stand() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn is_stand(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Validates a discard request according to the exchange rules.
///
/// # Arguments
///
/// * `indices` - Private-hand slots to discard, each 0 or 1
/// * `budget_remaining` - Cards the seat may still replace in this window
///
/// # Errors
///
/// - [`ExchangeError::SlotOutOfRange`] - an index other than 0 or 1
/// - [`ExchangeError::DuplicateSlot`] - the same slot listed twice
/// - [`ExchangeError::BudgetExceeded`] - more slots than the remaining budget
///
/// # Examples
///
/// ```
/// use holdem_shot_engine::rules::validate_exchange;
/// use holdem_shot_engine::errors::ExchangeError;
///
/// let ok = validate_exchange(&[1, 0], 2).unwrap();
/// assert_eq!(ok.slots(), &[0, 1]);
///
/// assert!(matches!(
///     validate_exchange(&[0, 0], 2),
///     Err(ExchangeError::DuplicateSlot { index: 0 })
/// ));
/// assert!(matches!(
///     validate_exchange(&[2], 2),
///     Err(ExchangeError::SlotOutOfRange { index: 2 })
/// ));
/// ```
pub fn validate_exchange(
    indices: &[usize],
    budget_remaining: u8,
) -> Result<ValidatedExchange, ExchangeError> {
    let remaining = budget_remaining.min(EXCHANGE_BUDGET);
    if indices.len() > remaining as usize {
        return Err(ExchangeError::BudgetExceeded {
            requested: indices.len(),
            remaining,
        });
    }
    let mut slots = Vec::with_capacity(indices.len());
    for &index in indices {
        if index > 1 {
            return Err(ExchangeError::SlotOutOfRange { index });
        }
        if slots.contains(&index) {
            return Err(ExchangeError::DuplicateSlot { index });
        }
        slots.push(index);
    }
    slots.sort_unstable();
    Ok(ValidatedExchange { slots })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_a_stand() {
        let v = validate_exchange(&[], 2).unwrap();
        assert!(v.is_stand());
        assert_eq!(v, ValidatedExchange::stand());
    }

    #[test]
    fn three_slots_exceed_budget() {
        assert_eq!(
            validate_exchange(&[0, 1, 0], 2),
            Err(ExchangeError::BudgetExceeded {
                requested: 3,
                remaining: 2
            })
        );
    }

    #[test]
    fn reduced_budget_is_enforced() {
        assert!(validate_exchange(&[1], 1).is_ok());
        assert!(matches!(
            validate_exchange(&[0, 1], 1),
            Err(ExchangeError::BudgetExceeded { .. })
        ));
        assert!(matches!(
            validate_exchange(&[0], 0),
            Err(ExchangeError::BudgetExceeded { .. })
        ));
    }
}
