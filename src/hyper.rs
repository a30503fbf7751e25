//! Hyperparameter data model.
use enum_map::{Enum, EnumMap};
use proptest_derive::Arbitrary;
use rust_decimal::Decimal;
use serde::{
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};
use static_assertions::const_assert;
use std::{iter::FromIterator, mem, ops::RangeInclusive, result};
use strum::ParseError;
use strum_macros::{Display, EnumString};

const_assert!(Parameter::N == 20);
const_assert!(ConfigId::N == 3);

/// Hyperparameter specific result type.
pub type Result<T> = result::Result<T, Error>;

/// All possible errors returned by this library.
#[derive(Debug)]
pub enum Error {
    /// Candidate list constructed without any values.
    Empty,

    /// Single value requested from a list with this many candidates.
    Ambiguous(usize),

    /// Option not populated in the space.
    Missing(Parameter),

    /// Failed to parse an option name.
    Parse(ParseError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

/// All tunable options of the experiment.
#[derive(
    Arbitrary,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Enum,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Parameter {
    /// Recurrent unit of the hidden layers.
    LayerType,

    /// Training loss function.
    Loss,

    /// Input weight initialization scheme.
    KernelInitializer,

    /// Recurrent weight initialization scheme.
    RecurrentInitializer,

    /// Activation function of the dense output layer.
    Activation,

    /// Dropout rate on the recurrent connections.
    RecurrentDropout,

    /// Number of hidden layers.
    Depth,

    /// Whether the hidden layers are bidirectional.
    Bidirectional,

    /// Number of hidden neurons per layer.
    HiddenNeurons,

    /// Gradient descent algorithm.
    Optimiser,

    /// Gradient descent step size.
    LearningRate,

    /// Dropout rate on the layer inputs.
    Dropout,

    /// Bias l1 regularization coefficient.
    #[serde(rename = "b_l1_reg")]
    #[strum(serialize = "b_l1_reg")]
    BiasL1,

    /// Bias l2 regularization coefficient.
    #[serde(rename = "b_l2_reg")]
    #[strum(serialize = "b_l2_reg")]
    BiasL2,

    /// Recurrent weight l1 regularization coefficient.
    #[serde(rename = "r_l1_reg")]
    #[strum(serialize = "r_l1_reg")]
    RecurrentL1,

    /// Recurrent weight l2 regularization coefficient.
    #[serde(rename = "r_l2_reg")]
    #[strum(serialize = "r_l2_reg")]
    RecurrentL2,

    /// Number of training epochs.
    Epochs,

    /// Number of consecutive observations per sample.
    SequenceLength,

    /// Number of samples per gradient update.
    BatchSize,

    /// Label of the configuration.
    Description,
}

impl Parameter {
    /// Total number of tunable options.
    pub const N: usize = mem::size_of::<EnumMap<Parameter, u8>>();
}

/// All available recurrent unit types.
#[derive(
    Arbitrary, Clone, Copy, Debug, Deserialize, Display, Enum, EnumString, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecurrentUnit {
    /// Gated recurrent unit.
    Gru,

    /// Long short term memory unit.
    Lstm,
}

/// All available training loss functions.
#[derive(
    Arbitrary, Clone, Copy, Debug, Deserialize, Display, Enum, EnumString, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Loss {
    /// Log loss for binary classification.
    BinaryCrossentropy,

    /// Mean squared error for regression.
    MeanSquaredError,
}

/// All available weight initialization schemes.
#[derive(
    Arbitrary, Clone, Copy, Debug, Deserialize, Display, Enum, EnumString, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Initializer {
    /// Uniform draw scaled by fan in, per LeCun 98.
    LecunUniform,

    /// Uniform draw scaled by fan in and fan out.
    GlorotUniform,
}

/// All available output layer activation functions.
#[derive(
    Arbitrary, Clone, Copy, Debug, Deserialize, Display, Enum, EnumString, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Activation {
    /// Logistic function.
    Sigmoid,

    /// Hyperbolic tangent.
    Tanh,
}

/// All available gradient descent algorithms.
#[derive(
    Arbitrary, Clone, Copy, Debug, Deserialize, Display, Enum, EnumString, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Optimiser {
    /// Adaptive moment estimation.
    Adam,

    /// Root mean square propagation.
    Rmsprop,

    /// Stochastic gradient descent.
    Sgd,
}

/// Labels for the configurations reported in the paper.
#[derive(
    Arbitrary, Clone, Copy, Debug, Deserialize, Display, Enum, EnumString, Eq, PartialEq, Serialize,
)]
pub enum ConfigId {
    /// Best configuration found by the random search.
    A,

    /// Second best configuration.
    B,

    /// Third best configuration.
    C,
}

impl ConfigId {
    /// Total number of reported configurations.
    pub const N: usize = mem::size_of::<EnumMap<ConfigId, u8>>();
}

/// One candidate setting for a hyperparameter.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric setting, kept exact.
    Number(Decimal),

    /// On or off switch setting.
    Toggle(bool),

    /// Recurrent unit type setting.
    Unit(RecurrentUnit),

    /// Loss function setting.
    Loss(Loss),

    /// Weight initialization setting.
    Initializer(Initializer),

    /// Activation function setting.
    Activation(Activation),

    /// Gradient descent algorithm setting.
    Optimiser(Optimiser),

    /// Configuration label setting.
    Label(ConfigId),
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Toggle(value)
    }
}

impl From<RecurrentUnit> for Value {
    fn from(value: RecurrentUnit) -> Self {
        Self::Unit(value)
    }
}

impl From<Loss> for Value {
    fn from(value: Loss) -> Self {
        Self::Loss(value)
    }
}

impl From<Initializer> for Value {
    fn from(value: Initializer) -> Self {
        Self::Initializer(value)
    }
}

impl From<Activation> for Value {
    fn from(value: Activation) -> Self {
        Self::Activation(value)
    }
}

impl From<Optimiser> for Value {
    fn from(value: Optimiser) -> Self {
        Self::Optimiser(value)
    }
}

impl From<ConfigId> for Value {
    fn from(value: ConfigId) -> Self {
        Self::Label(value)
    }
}

/// Non empty ordered list of candidate values for one option.
///
/// Repeated entries weight a random draw towards that value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Candidates(Vec<Value>);

impl Candidates {
    /// Builds a single point candidate list.
    pub fn single(value: impl Into<Value>) -> Self {
        Self(vec![value.into()])
    }

    /// Builds a candidate list from the given values, which must be non empty.
    pub fn of<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        let ret: Vec<_> = values.into_iter().map(Into::into).collect();
        assert!(!ret.is_empty());
        Self(ret)
    }

    /// Builds an evenly weighted sweep over an integer range.
    pub fn sweep(range: RangeInclusive<u32>) -> Self {
        Self::of(range)
    }

    /// Validates a candidate list built from dynamic input.
    pub fn new(values: Vec<Value>) -> Result<Self> {
        if values.is_empty() {
            Err(Error::Empty)
        } else {
            Ok(Self(values))
        }
    }

    /// Returns the sole candidate, or an error when the list is still a sweep.
    pub fn fixed(&self) -> Result<&Value> {
        match self.0.as_slice() {
            [value] => Ok(value),
            values => Err(Error::Ambiguous(values.len())),
        }
    }

    /// Returns the candidates in draw order.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Number of candidates, counting repeats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no candidates, which construction rules out.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A configuration: mapping from option to its candidate values.
///
/// Keys are unique by construction. Concrete configurations hold single
/// element lists, search spaces may hold sweeps and weighted lists.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Space(EnumMap<Parameter, Option<Candidates>>);

impl Space {
    /// Sets the candidate list for an option, returning any previous list.
    pub fn insert(&mut self, parameter: Parameter, candidates: Candidates) -> Option<Candidates> {
        self.0[parameter].replace(candidates)
    }

    /// Returns the candidate list for an option.
    pub fn get(&self, parameter: Parameter) -> Option<&Candidates> {
        self.0[parameter].as_ref()
    }

    /// Looks up an option by its framework name.
    pub fn lookup(&self, name: &str) -> Result<&Candidates> {
        let parameter = name.parse()?;
        self.get(parameter).ok_or(Error::Missing(parameter))
    }

    /// Returns the pinned value for an option of a concrete configuration.
    pub fn fixed(&self, parameter: Parameter) -> Result<&Value> {
        self.get(parameter).ok_or(Error::Missing(parameter))?.fixed()
    }

    /// Whether the option is populated.
    pub fn contains(&self, parameter: Parameter) -> bool {
        self.0[parameter].is_some()
    }

    /// Iterates over the populated options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &Candidates)> {
        self.0.iter().filter_map(|(k, v)| v.as_ref().map(|c| (k, c)))
    }

    /// Number of populated options.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no options are populated.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<(Parameter, Candidates)> for Space {
    fn from_iter<I: IntoIterator<Item = (Parameter, Candidates)>>(iter: I) -> Self {
        let mut ret = Self::default();
        for (parameter, candidates) in iter {
            ret.insert(parameter, candidates);
        }
        ret
    }
}

impl Serialize for Space {
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (parameter, candidates) in self.iter() {
            map.serialize_entry(&parameter, candidates)?;
        }
        map.end()
    }
}

/// Combines two spaces, with options from `overrides` winning on collision.
pub fn merge(base: &Space, overrides: &Space) -> Space {
    let mut ret = base.clone();
    for (parameter, candidates) in overrides.iter() {
        ret.insert(parameter, candidates.clone());
    }
    ret
}

#[cfg(test)]
mod tests {
    use proptest::prelude::proptest;

    proptest! {
        #[test]
        fn merge_prefers_the_override_side(parameter: super::Parameter, base: u8, over: u8) {
            let mut a = super::Space::default();
            a.insert(parameter, super::Candidates::single(u32::from(base)));
            let mut b = super::Space::default();
            b.insert(parameter, super::Candidates::single(u32::from(over)));
            let merged = super::merge(&a, &b);
            assert_eq!(merged.get(parameter), b.get(parameter));
            assert_eq!(merged.len(), 1);
        }

        #[test]
        fn merge_keeps_disjoint_options(first: super::Parameter, second: super::Parameter) {
            let mut a = super::Space::default();
            a.insert(first, super::Candidates::single(true));
            let mut b = super::Space::default();
            b.insert(second, super::Candidates::single(false));
            let merged = super::merge(&a, &b);
            assert_eq!(merged.get(second), b.get(second));
            if first != second {
                assert_eq!(merged.get(first), a.get(first));
                assert_eq!(merged.len(), 2);
            } else {
                assert_eq!(merged.len(), 1);
            }
        }

        #[test]
        fn option_names_round_trip(parameter: super::Parameter) {
            let name = parameter.to_string();
            assert_eq!(name.parse::<super::Parameter>().unwrap(), parameter);
        }
    }

    #[test]
    fn sole_candidate_of_a_sweep_is_ambiguous() {
        let sweep = super::Candidates::sweep(1..=20);
        assert!(matches!(sweep.fixed(), Err(super::Error::Ambiguous(20))));
        let single = super::Candidates::single(64u32);
        assert_eq!(single.fixed().unwrap(), &super::Value::from(64u32));
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        assert!(matches!(
            super::Candidates::new(Vec::new()),
            Err(super::Error::Empty)
        ));
        let values = vec![super::Value::from(false)];
        assert_eq!(
            super::Candidates::new(values).unwrap(),
            super::Candidates::single(false)
        );
    }

    #[test]
    fn lookup_uses_framework_names() {
        let mut space = super::Space::default();
        space.insert(
            super::Parameter::RecurrentL1,
            super::Candidates::single(0u32),
        );
        assert_eq!(
            space.lookup("r_l1_reg").unwrap(),
            &super::Candidates::single(0u32)
        );
        assert!(matches!(
            space.lookup("epochs"),
            Err(super::Error::Missing(super::Parameter::Epochs))
        ));
        assert!(matches!(
            space.lookup("momentum"),
            Err(super::Error::Parse(_))
        ));
    }
}
