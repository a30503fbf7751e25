//! Search space and named configurations of the RNN experiment.
//!
//! Random search space plus the three configurations reported in
//! <https://arxiv.org/pdf/1708.03513.pdf>, each merged with the parameters
//! fixed for all experiments.
use super::hyper::{
    self, Activation, Candidates, ConfigId, Initializer, Loss, Optimiser, Parameter,
    RecurrentUnit, Space,
};
use enum_map::{enum_map, EnumMap};
use rust_decimal::Decimal;
use std::iter;

/// Parameters fixed for all experiments.
pub fn fixed_parameters() -> Space {
    vec![
        (
            Parameter::LayerType,
            Candidates::single(RecurrentUnit::Gru),
        ),
        (
            Parameter::Loss,
            Candidates::single(Loss::BinaryCrossentropy),
        ),
        (
            Parameter::KernelInitializer,
            Candidates::single(Initializer::LecunUniform),
        ),
        (
            Parameter::RecurrentInitializer,
            Candidates::single(Initializer::LecunUniform),
        ),
        (
            Parameter::Activation,
            Candidates::single(Activation::Sigmoid),
        ),
        (Parameter::RecurrentDropout, Candidates::single(0)),
    ]
    .into_iter()
    .collect()
}

/// Dropout rates, with zero repeated to weight the draw towards no dropout.
fn dropout_rates() -> Candidates {
    let weighted_zero = iter::repeat(Decimal::ZERO).take(2);
    Candidates::of(weighted_zero.chain((0..=5).map(|i| Decimal::new(i, 1))))
}

/// A regularization coefficient is either off or one percent.
fn regularizers() -> Candidates {
    Candidates::of(vec![Decimal::ZERO, Decimal::new(1, 2)])
}

/// One tenth of a percent, the learning rate shared by the configurations.
fn learning_rate() -> Candidates {
    Candidates::single(Decimal::new(1, 3))
}

/// Returns the random search space, merged with the fixed parameters.
///
/// Fixed parameters win on collision, so the swept `recurrent_dropout` list
/// collapses back to the pinned zero.
pub fn all() -> Space {
    let options = vec![
        (Parameter::Depth, Candidates::sweep(1..=3)),
        (Parameter::Bidirectional, Candidates::of(vec![true, false])),
        (Parameter::HiddenNeurons, Candidates::sweep(1..=500)),
        (Parameter::Optimiser, Candidates::single(Optimiser::Adam)),
        (Parameter::Dropout, dropout_rates()),
        (Parameter::BiasL1, regularizers()),
        (Parameter::BiasL2, regularizers()),
        (Parameter::RecurrentL1, regularizers()),
        (Parameter::RecurrentL2, regularizers()),
        (Parameter::Epochs, Candidates::sweep(1..=99)),
        (Parameter::SequenceLength, Candidates::sweep(1..=20)),
        (
            Parameter::BatchSize,
            Candidates::of((0..5).map(|i| 32u32 << i)),
        ),
        (Parameter::RecurrentDropout, dropout_rates()),
    ]
    .into_iter()
    .collect();
    hyper::merge(&options, &fixed_parameters())
}

/// Returns configuration A, merged with the fixed parameters.
pub fn config_a() -> Space {
    let a = vec![
        (Parameter::Depth, Candidates::single(3)),
        (Parameter::Bidirectional, Candidates::single(true)),
        (Parameter::HiddenNeurons, Candidates::single(74)),
        (Parameter::LearningRate, learning_rate()),
        (Parameter::Optimiser, Candidates::single(Optimiser::Adam)),
        (Parameter::Dropout, Candidates::single(Decimal::new(3, 1))),
        (Parameter::BiasL1, Candidates::single(0)),
        (Parameter::BiasL2, Candidates::single(0)),
        (Parameter::RecurrentL1, Candidates::single(0)),
        (
            Parameter::RecurrentL2,
            Candidates::single(Decimal::new(1, 2)),
        ),
        (Parameter::Epochs, Candidates::single(53)),
        (Parameter::SequenceLength, Candidates::sweep(1..=30)),
        (Parameter::BatchSize, Candidates::single(64)),
        (Parameter::Description, Candidates::single(ConfigId::A)),
    ]
    .into_iter()
    .collect();
    hyper::merge(&a, &fixed_parameters())
}

/// Returns configuration B, merged with the fixed parameters.
pub fn config_b() -> Space {
    let b = vec![
        (Parameter::Depth, Candidates::single(1)),
        (Parameter::Bidirectional, Candidates::single(true)),
        (Parameter::HiddenNeurons, Candidates::single(358)),
        (Parameter::LearningRate, learning_rate()),
        (Parameter::Optimiser, Candidates::single(Optimiser::Adam)),
        (Parameter::Dropout, Candidates::single(Decimal::new(1, 1))),
        (Parameter::BiasL1, Candidates::single(0)),
        (Parameter::BiasL2, Candidates::single(0)),
        (Parameter::RecurrentL1, Candidates::single(0)),
        (
            Parameter::RecurrentL2,
            Candidates::single(Decimal::new(1, 2)),
        ),
        (Parameter::Epochs, Candidates::single(112)),
        (Parameter::SequenceLength, Candidates::sweep(1..=20)),
        (Parameter::BatchSize, Candidates::single(64)),
        (Parameter::Description, Candidates::single(ConfigId::B)),
    ]
    .into_iter()
    .collect();
    hyper::merge(&b, &fixed_parameters())
}

/// Returns configuration C, merged with the fixed parameters.
pub fn config_c() -> Space {
    let c = vec![
        (Parameter::Depth, Candidates::single(2)),
        (Parameter::Bidirectional, Candidates::single(false)),
        (Parameter::HiddenNeurons, Candidates::single(195)),
        (Parameter::LearningRate, learning_rate()),
        (Parameter::Optimiser, Candidates::single(Optimiser::Adam)),
        (Parameter::Dropout, Candidates::single(Decimal::new(1, 1))),
        (Parameter::BiasL1, Candidates::single(0)),
        (Parameter::BiasL2, Candidates::single(0)),
        (
            Parameter::RecurrentL1,
            Candidates::single(Decimal::new(1, 2)),
        ),
        (Parameter::RecurrentL2, Candidates::single(0)),
        (Parameter::Epochs, Candidates::single(39)),
        (Parameter::SequenceLength, Candidates::sweep(1..=30)),
        (Parameter::BatchSize, Candidates::single(64)),
        (Parameter::Description, Candidates::single(ConfigId::C)),
    ]
    .into_iter()
    .collect();
    hyper::merge(&c, &fixed_parameters())
}

/// Returns the top three configurations keyed by label.
pub fn catalogue() -> EnumMap<ConfigId, Space> {
    enum_map! {
        ConfigId::A => config_a(),
        ConfigId::B => config_b(),
        ConfigId::C => config_c(),
    }
}
