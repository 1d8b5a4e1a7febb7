use bpps_core::{FractionRange, GenerationJob};
use bpps_generate::{GenerationOutcome, InstanceBuilder, encode_instance, instance_filename};

fn main() {
    let job = GenerationJob {
        index: 0,
        capacity: 200,
        item_count: 75,
        class_count: 10,
        item_weight_range: FractionRange(0.05, 0.15),
        setup_weight_range: FractionRange(0.01, 0.10),
        setup_cost_flag: 1,
        seed: 0,
    };

    match InstanceBuilder::new(2, 10).build_job(&job) {
        GenerationOutcome::Success(instance) => {
            println!("{}", instance_filename(&job));
            print!("{}", encode_instance(&instance));
        }
        GenerationOutcome::Failure(reason) => eprintln!("{job}: {reason}"),
    }
}
