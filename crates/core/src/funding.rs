//! Funding admission policy.
//!
//! Pure decision logic for the contribution ledger: given a wish's price,
//! the sum already raised, and a proposed contribution, decide whether the
//! contribution is admissible. Callers are responsible for computing
//! `current_raised` from the ledger (excluding the offer under revision
//! when re-checking an amount change) and for holding whatever lock makes
//! the read-decide-write sequence atomic.

use crate::types::{DbId, Money};

/// Why a proposed contribution was rejected.
///
/// `AlreadyFunded` and `ExceedsRemaining` are distinct on purpose; the API
/// surfaces them as different user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FundingError {
    #[error("You cannot contribute to your own wish")]
    SelfFunding,

    #[error("This wish is already fully funded")]
    AlreadyFunded,

    #[error("Contribution exceeds remaining amount")]
    ExceedsRemaining,
}

/// Amount still fundable for a wish. Can be negative if the ledger already
/// exceeds the price (which the admission checks are there to prevent).
pub fn remaining(price: Money, current_raised: Money) -> Money {
    price - current_raised
}

/// Check that the contributor is not the wish owner.
///
/// Self-funding is rejected unconditionally, independent of how much
/// remains fundable.
pub fn ensure_not_self_funding(wish_owner_id: DbId, contributor_id: DbId) -> Result<(), FundingError> {
    if wish_owner_id == contributor_id {
        return Err(FundingError::SelfFunding);
    }
    Ok(())
}

/// Decide whether a proposed contribution is admissible.
///
/// Admits iff something remains fundable and the proposed amount fits
/// within it. `current_raised` must exclude the offer being revised when
/// this is an amount-change re-check.
pub fn admit(price: Money, current_raised: Money, proposed: Money) -> Result<(), FundingError> {
    let remaining = remaining(price, current_raised);
    if remaining <= Money::ZERO {
        return Err(FundingError::AlreadyFunded);
    }
    if proposed > remaining {
        return Err(FundingError::ExceedsRemaining);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn admits_within_remaining() {
        assert_eq!(admit(dec!(100), dec!(30), dec!(40)), Ok(()));
    }

    #[test]
    fn admits_exactly_remaining() {
        // Boundary: amount == remaining closes the wish, still admissible.
        assert_eq!(admit(dec!(100), dec!(30), dec!(70)), Ok(()));
    }

    #[test]
    fn rejects_when_fully_funded() {
        assert_eq!(
            admit(dec!(100), dec!(100), dec!(0.01)),
            Err(FundingError::AlreadyFunded)
        );
    }

    #[test]
    fn rejects_when_over_funded() {
        // Ledger state the invariant forbids, but the policy must still
        // reject rather than dig the hole deeper.
        assert_eq!(
            admit(dec!(100), dec!(120), dec!(1)),
            Err(FundingError::AlreadyFunded)
        );
    }

    #[test]
    fn rejects_amount_exceeding_remaining() {
        assert_eq!(
            admit(dec!(100), dec!(30), dec!(70.01)),
            Err(FundingError::ExceedsRemaining)
        );
    }

    #[test]
    fn empty_ledger_admits_up_to_price() {
        assert_eq!(admit(dec!(50), dec!(0), dec!(50)), Ok(()));
        assert_eq!(
            admit(dec!(50), dec!(0), dec!(50.01)),
            Err(FundingError::ExceedsRemaining)
        );
    }

    #[test]
    fn remaining_goes_negative_when_ledger_exceeds_price() {
        assert_eq!(remaining(dec!(100), dec!(120)), dec!(-20));
    }

    #[test]
    fn self_funding_is_rejected_unconditionally() {
        assert_eq!(
            ensure_not_self_funding(7, 7),
            Err(FundingError::SelfFunding)
        );
        assert_eq!(ensure_not_self_funding(7, 8), Ok(()));
    }
}
