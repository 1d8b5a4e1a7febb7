use crate::errors::FailureReason;
use crate::random::RandomSource;

/// Split `item_count` items into `class_count` classes of at least
/// `min_items_per_class` items each.
///
/// Every class first receives the minimum; each remaining item then goes to a
/// uniformly drawn class. The feasibility check runs before any draw, so an
/// infeasible request leaves `rng` untouched.
pub fn partition_items(
    item_count: u32,
    class_count: u32,
    min_items_per_class: u32,
    rng: &mut RandomSource,
) -> Result<Vec<u32>, FailureReason> {
    let required = u64::from(class_count) * u64::from(min_items_per_class);
    if u64::from(item_count) < required || (class_count == 0 && item_count > 0) {
        return Err(FailureReason::InfeasiblePartition {
            item_count,
            class_count,
            min_items_per_class,
        });
    }

    let mut sizes = vec![min_items_per_class; class_count as usize];
    let surplus = u64::from(item_count) - required;
    for _ in 0..surplus {
        let class = rng.index(sizes.len());
        sizes[class] += 1;
    }

    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_sum_to_item_count() {
        let mut rng = RandomSource::from_seed(3);
        let sizes = partition_items(75, 10, 2, &mut rng).expect("feasible");
        assert_eq!(sizes.len(), 10);
        assert_eq!(sizes.iter().sum::<u32>(), 75);
        assert!(sizes.iter().all(|size| *size >= 2));
        assert_eq!(rng.draws(), 55);
    }

    #[test]
    fn exact_fit_draws_nothing() {
        let mut rng = RandomSource::from_seed(3);
        let sizes = partition_items(20, 10, 2, &mut rng).expect("feasible");
        assert_eq!(sizes, vec![2; 10]);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn infeasible_request_draws_nothing() {
        let mut rng = RandomSource::from_seed(3);
        let err = partition_items(5, 10, 2, &mut rng).expect_err("5 < 20");
        assert_eq!(
            err,
            FailureReason::InfeasiblePartition {
                item_count: 5,
                class_count: 10,
                min_items_per_class: 2,
            }
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn zero_classes_cannot_hold_items() {
        let mut rng = RandomSource::from_seed(0);
        assert!(partition_items(4, 0, 1, &mut rng).is_err());
    }
}
