//! Slot queue packing properties.
//!
//! Random push/pop sequences are replayed against a `VecDeque` model; the queue
//! must hold the same entries in the same order and never leave a gap before an
//! occupied slot.

use std::collections::VecDeque;

use pipesim_core::core::pipeline::latches::{InstId, PreAluQueue, PreIssueBuffer};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pre_issue_stays_packed_and_ordered(ops in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut queue = PreIssueBuffer::new();
        let mut model = VecDeque::new();
        let mut next = 0;

        for push in ops {
            if push {
                let slot = queue.push(InstId(next));
                if model.len() < queue.capacity() {
                    prop_assert_eq!(slot, Some(model.len()));
                    model.push_back(InstId(next));
                } else {
                    prop_assert_eq!(slot, None);
                }
                next += 1;
            } else {
                prop_assert_eq!(queue.pop_front(), model.pop_front());
            }

            prop_assert!(queue.is_packed());
            prop_assert_eq!(queue.iter().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(queue.is_full(), model.len() == queue.capacity());
        }
    }

    #[test]
    fn pre_alu_never_exceeds_two_entries(pushes in 0usize..8) {
        let mut queue = PreAluQueue::new();
        for i in 0..pushes {
            let _ = queue.push(InstId(i));
        }
        prop_assert_eq!(queue.occupied(), pushes.min(2));
        prop_assert_eq!(queue.head(), (pushes > 0).then_some(InstId(0)));
    }
}
