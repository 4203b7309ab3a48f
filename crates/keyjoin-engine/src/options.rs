use keyjoin_ingest::LoadOptions;

use crate::emit::OutputDelimiter;

/// Sample size used when none is requested.
pub const DEFAULT_SAMPLE_SIZE: usize = 100_000;

/// Output path used when none is requested.
pub const DEFAULT_OUTPUT: &str = "merged.csv";

/// Options for one merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Maximum number of keys to write.
    pub sample_size: usize,
    /// Fixed RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    pub output_delimiter: OutputDelimiter,
    pub load: LoadOptions,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            output_delimiter: OutputDelimiter::default(),
            load: LoadOptions::default(),
        }
    }
}

impl MergeOptions {
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_output_delimiter(mut self, delimiter: OutputDelimiter) -> Self {
        self.output_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_load(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }
}
