use bpps_core::{GenerationConfig, GenerationJob};

/// Deterministic enumeration of the jobs of a sweep.
///
/// Jobs follow the Cartesian product of the config lists with classes
/// outermost, then item counts, capacities, item-weight ranges, setup-weight
/// ranges, setup-cost flags, and seeds innermost. Nothing is materialized:
/// any job can be decoded from its index.
#[derive(Debug, Clone, Copy)]
pub struct JobPlan<'a> {
    config: &'a GenerationConfig,
    len: usize,
}

impl<'a> JobPlan<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            len: config.job_count(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decode the job at `index`, or `None` past the end.
    pub fn job_at(&self, index: usize) -> Option<GenerationJob> {
        if index >= self.len {
            return None;
        }

        let config = self.config;
        let mut rest = index;
        let mut digit = |radix: usize| {
            let value = rest % radix;
            rest /= radix;
            value
        };

        let seed = config.seeds[digit(config.seeds.len())];
        let setup_cost_flag = config.setup_cost_flags[digit(config.setup_cost_flags.len())];
        let setup_weight_range = config.setup_weight_ranges[digit(config.setup_weight_ranges.len())];
        let item_weight_range = config.item_weight_ranges[digit(config.item_weight_ranges.len())];
        let capacity = config.capacities[digit(config.capacities.len())];
        let item_count = config.num_items[digit(config.num_items.len())];
        let class_count = config.num_classes[digit(config.num_classes.len())];

        Some(GenerationJob {
            index,
            capacity,
            item_count,
            class_count,
            item_weight_range,
            setup_weight_range,
            setup_cost_flag,
            seed,
        })
    }

    /// Fresh iterator over every job, from the first.
    pub fn iter(&self) -> JobIter<'a> {
        JobIter {
            plan: *self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for JobPlan<'a> {
    type Item = GenerationJob;
    type IntoIter = JobIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the jobs of a [`JobPlan`].
#[derive(Debug, Clone)]
pub struct JobIter<'a> {
    plan: JobPlan<'a>,
    next: usize,
}

impl Iterator for JobIter<'_> {
    type Item = GenerationJob;

    fn next(&mut self) -> Option<Self::Item> {
        let job = self.plan.job_at(self.next)?;
        self.next += 1;
        Some(job)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n);
        self.next()
    }
}

impl ExactSizeIterator for JobIter<'_> {}

/// Expand `config` into its job sequence.
pub fn expand_jobs(config: &GenerationConfig) -> JobIter<'_> {
    JobPlan::new(config).iter()
}
