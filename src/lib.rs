#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::private_doc_tests)]
#![deny(missing_docs)]
//! Hyperparameter configurations for the RNN experiment.
//!
//! Provides the random search space and the three configurations reported
//! in <https://arxiv.org/pdf/1708.03513.pdf> as typed, immutable mappings
//! from option to candidate values.

pub mod configs;
pub mod hyper;
