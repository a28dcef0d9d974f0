//! Kitchen status workflow.
//!
//! Orders only ever move forward: `pending -> preparing -> ready -> delivered`.
//! The kitchen display offers a single "advance" action per state, but a
//! forward skip (for example `preparing -> delivered` when a runner serves the
//! dish straight from the pass) is accepted. Moving backwards is rejected.

use crate::models::OrderStatus;

impl OrderStatus {
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Delivered => 3,
        }
    }

    /// The status the kitchen advances to, `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Requested status equals the current one; nothing to persist or broadcast.
    Unchanged,
    Advanced {
        from: OrderStatus,
        to: OrderStatus,
    },
}

impl Transition {
    pub fn evicts(&self) -> bool {
        matches!(
            self,
            Transition::Advanced {
                to: OrderStatus::Delivered,
                ..
            }
        )
    }

    pub fn notifies_table(&self) -> bool {
        matches!(
            self,
            Transition::Advanced {
                to: OrderStatus::Ready,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move order from {from} back to {to}")]
pub struct BackwardTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
) -> Result<Transition, BackwardTransition> {
    match from.rank().cmp(&to.rank()) {
        std::cmp::Ordering::Equal => Ok(Transition::Unchanged),
        std::cmp::Ordering::Less => Ok(Transition::Advanced { from, to }),
        std::cmp::Ordering::Greater => Err(BackwardTransition { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn next_walks_the_whole_lifecycle() {
        let mut seen = vec![Pending];
        let mut current = Pending;
        while let Some(next) = current.next() {
            seen.push(next);
            current = next;
        }
        assert_eq!(seen, vec![Pending, Preparing, Ready, Delivered]);
    }

    #[test]
    fn backward_moves_are_rejected() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let result = check_transition(from, to);
                if to.rank() < from.rank() {
                    assert_eq!(result, Err(BackwardTransition { from, to }));
                } else {
                    assert!(result.is_ok(), "{from} -> {to} should be allowed");
                }
            }
        }
    }

    #[test]
    fn side_effects_follow_the_target_state() {
        let ready = check_transition(Preparing, Ready).unwrap();
        assert!(ready.notifies_table());
        assert!(!ready.evicts());

        let skip = check_transition(Preparing, Delivered).unwrap();
        assert!(skip.evicts());

        let same = check_transition(Ready, Ready).unwrap();
        assert_eq!(same, Transition::Unchanged);
        assert!(!same.evicts());
    }
}
