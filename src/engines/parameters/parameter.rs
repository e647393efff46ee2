//! Mapping between normalized genes and bounded strategy parameters
//!
//! A `Parameter` decodes a gene `g` in `[0, 1)` to `min + g * (max - min)`.
//! Integer parameters truncate the decoded value toward zero, so an integer
//! parameter over `[30, 86400)` yields whole seconds.

use crate::engines::generation::Gene;
use crate::error::{GenetradeError, Result};
use crate::utils::is_close;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    #[default]
    Real,
    Integer,
}

/// A decoded parameter value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Real(f64),
}

impl ParameterValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            ParameterValue::Real(v) => *v,
            ParameterValue::Integer(v) => *v as f64,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(v) => Some(*v),
            ParameterValue::Real(_) => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Real(v) => write!(f, "{}", v),
            ParameterValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameter {
    min: f64,
    max: f64,
    kind: ParameterKind,
}

impl Parameter {
    /// Half-width of the implied range, as a fraction of the initial value
    pub const DEFAULT_RANGE_PERCENTAGE: f64 = 0.5;

    pub fn new(min: f64, max: f64) -> Result<Self> {
        Self::with_kind(min, max, ParameterKind::Real)
    }

    pub fn integer(min: f64, max: f64) -> Result<Self> {
        Self::with_kind(min, max, ParameterKind::Integer)
    }

    pub fn with_kind(min: f64, max: f64, kind: ParameterKind) -> Result<Self> {
        // Negated so NaN bounds are rejected too
        if !(max > min) || !min.is_finite() || !max.is_finite() {
            return Err(GenetradeError::InvalidBounds { min, max });
        }
        Ok(Self { min, max, kind })
    }

    /// Build a parameter around `initial`, returning it with the gene that decodes back to `initial`.
    ///
    /// Missing bounds default to `initial ± |initial| * DEFAULT_RANGE_PERCENTAGE`.
    pub fn from_initial(
        initial: f64,
        min: Option<f64>,
        max: Option<f64>,
        kind: ParameterKind,
    ) -> Result<(Self, Gene)> {
        let half_width = initial.abs() * Self::DEFAULT_RANGE_PERCENTAGE;
        let parameter = Self::with_kind(
            min.unwrap_or(initial - half_width),
            max.unwrap_or(initial + half_width),
            kind,
        )?;
        let gene = parameter.encode(initial)?;
        Ok((parameter, gene))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Linear decode without integer truncation
    pub fn decode_real(&self, gene: &Gene) -> f64 {
        self.min + gene.value() * self.span()
    }

    pub fn decode(&self, gene: &Gene) -> ParameterValue {
        let value = self.decode_real(gene);
        match self.kind {
            ParameterKind::Real => ParameterValue::Real(value),
            ParameterKind::Integer => ParameterValue::Integer(value.trunc() as i64),
        }
    }

    /// Inverse mapping. Fails when `value` lies outside `[min, max]`, since the
    /// clamped gene would no longer decode back to it. Non-finite values never
    /// round-trip.
    pub fn encode(&self, value: f64) -> Result<Gene> {
        if !value.is_finite() {
            return Err(GenetradeError::RoundTrip {
                initial: value,
                decoded: self.decode_real(&Gene::new(value)),
            });
        }
        let gene = Gene::new((value - self.min) / self.span());
        let decoded = self.decode_real(&gene);

        if !is_close(value, decoded) && (value - decoded).abs() > 1e-9 * self.span() {
            return Err(GenetradeError::RoundTrip {
                initial: value,
                decoded,
            });
        }
        Ok(gene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_decode() {
        let param = Parameter::new(10.0, 20.0).unwrap();
        assert_eq!(param.decode(&Gene::new(0.0)), ParameterValue::Real(10.0));
        assert_eq!(param.decode(&Gene::new(0.5)), ParameterValue::Real(15.0));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            Parameter::new(5.0, 5.0),
            Err(GenetradeError::InvalidBounds { .. })
        ));
        assert!(Parameter::new(6.0, 5.0).is_err());
        assert!(Parameter::new(f64::NAN, 5.0).is_err());
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        let param = Parameter::integer(-10.0, 10.0).unwrap();
        // -10 + 0.26 * 20 = -4.8
        assert_eq!(param.decode(&Gene::new(0.26)), ParameterValue::Integer(-4));
        // -10 + 0.74 * 20 = 4.8
        assert_eq!(param.decode(&Gene::new(0.74)), ParameterValue::Integer(4));
    }

    #[test]
    fn test_from_initial_default_range() {
        let (param, gene) = Parameter::from_initial(50.0, None, None, ParameterKind::Real).unwrap();
        assert_eq!(param.min(), 25.0);
        assert_eq!(param.max(), 75.0);
        assert!((gene.value() - 0.5).abs() < 1e-12);
        assert!((param.decode(&gene).as_f64() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_initial_zero_has_no_range() {
        assert!(matches!(
            Parameter::from_initial(0.0, None, None, ParameterKind::Real),
            Err(GenetradeError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_encode_out_of_range_value() {
        let param = Parameter::new(0.0, 10.0).unwrap();
        assert!(matches!(param.encode(20.0), Err(GenetradeError::RoundTrip { .. })));
    }

    #[test]
    fn test_encode_rejects_non_finite_values() {
        let param = Parameter::new(0.0, 10.0).unwrap();
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(
                matches!(param.encode(value), Err(GenetradeError::RoundTrip { .. })),
                "{} was encoded",
                value
            );
        }
        assert!(Parameter::from_initial(f64::NAN, Some(0.0), Some(10.0), ParameterKind::Real).is_err());
    }
}
