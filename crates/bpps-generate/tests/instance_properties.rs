use bpps_core::{FractionRange, GenerationConfig, GenerationJob};
use bpps_generate::{
    FailureReason, GenerationEngine, GenerationOutcome, InstanceBuilder, RandomSource,
    SETUP_COST_MAX, WeightSampler,
};

fn job(item_count: u32, class_count: u32, setup_cost_flag: u8, seed: u64) -> GenerationJob {
    GenerationJob {
        index: 0,
        capacity: 200,
        item_count,
        class_count,
        item_weight_range: FractionRange(0.05, 0.15),
        setup_weight_range: FractionRange(0.01, 0.10),
        setup_cost_flag,
        seed,
    }
}

#[test]
fn reference_job_builds_ten_classes() {
    let builder = InstanceBuilder::new(2, 10);
    let outcome = builder.build_job(&job(75, 10, 1, 0));
    let instance = outcome.instance().expect("feasible job");

    assert_eq!(instance.class_count, 10);
    assert_eq!(instance.classes.len(), 10);
    assert_eq!(instance.item_count, 75);
    assert_eq!(instance.capacity, 200);
    assert_eq!(instance.bin_cost, 10);
    assert_eq!(
        instance.classes.iter().map(|c| c.item_count()).sum::<usize>(),
        75
    );
    for class in &instance.classes {
        assert!(class.item_count() >= 2);
        assert!(class.setup_cost < 0);
        assert!(class.setup_cost >= -(SETUP_COST_MAX as i64));
        assert!((2..=20).contains(&class.setup_weight));
        assert!(class.item_weights.iter().all(|w| (10..=30).contains(w)));
    }
    instance.check_structure().expect("structurally valid");
}

#[test]
fn setup_costs_are_zero_without_flag() {
    let builder = InstanceBuilder::new(2, 10);
    for seed in 0..8 {
        let outcome = builder.build_job(&job(50, 5, 0, seed));
        let instance = outcome.instance().expect("feasible job");
        assert!(instance.classes.iter().all(|class| class.setup_cost == 0));
    }
}

#[test]
fn infeasible_job_fails_without_drawing() {
    let builder = InstanceBuilder::new(2, 10);
    let job = job(5, 10, 1, 0);
    let mut rng = RandomSource::for_job(&job);

    let err = builder.build(&job, &mut rng).expect_err("5 < 10 * 2");
    assert_eq!(
        err,
        FailureReason::InfeasiblePartition {
            item_count: 5,
            class_count: 10,
            min_items_per_class: 2,
        }
    );
    assert_eq!(rng.draws(), 0);
    assert!(matches!(
        builder.build_job(&job),
        GenerationOutcome::Failure(FailureReason::InfeasiblePartition { .. })
    ));
}

#[test]
fn draws_follow_fixed_order() {
    let builder = InstanceBuilder::new(2, 10);
    let job = job(30, 5, 1, 4);
    let mut rng = RandomSource::for_job(&job);
    builder.build(&job, &mut rng).expect("feasible job");

    // surplus + (setup weight + setup cost) per class + one per item
    let expected = (30 - 5 * 2) + 5 * 2 + 30;
    assert_eq!(rng.draws(), expected);
}

#[test]
fn weights_respect_rounded_bounds_across_sweep() {
    let config = GenerationConfig::default();
    let engine = GenerationEngine::default();

    for (job, outcome) in engine.outcomes(&config) {
        let Some(instance) = outcome.instance() else {
            panic!("default sweep is feasible, job {job} failed");
        };
        let (item_low, item_high) = WeightSampler::new(job.capacity, job.item_weight_range).bounds();
        let (setup_low, setup_high) =
            WeightSampler::new(job.capacity, job.setup_weight_range).bounds();

        for class in &instance.classes {
            assert!((setup_low..=setup_high).contains(&class.setup_weight));
            assert!(class.setup_weight <= job.capacity);
            assert!(
                class
                    .item_weights
                    .iter()
                    .all(|w| (item_low..=item_high).contains(w))
            );
            assert_eq!(class.setup_cost < 0, job.has_setup_costs());
        }
        instance.check_structure().expect("structurally valid");
    }
}

#[test]
fn same_job_rebuilds_identically() {
    let builder = InstanceBuilder::new(3, 10);
    let job = job(100, 10, 1, 9);
    assert_eq!(builder.build_job(&job), builder.build_job(&job));

    let other_seed = GenerationJob { seed: 10, ..job.clone() };
    assert_ne!(builder.build_job(&job), builder.build_job(&other_seed));
}
