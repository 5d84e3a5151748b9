//! # Witness Polynomial
//!
//! The private witness of a step is interpreted as the coefficients of a
//! polynomial and opened at the Fiat-Shamir challenge.

use crate::field::FieldElement;

/// Polynomial represented as coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<FieldElement>,
}

impl Polynomial {
    /// Create polynomial from coefficients (lowest degree first).
    pub fn new(coeffs: Vec<FieldElement>) -> Self {
        let mut p = Self { coeffs };
        p.normalize();
        p
    }

    /// Get degree (-1 for zero polynomial).
    pub fn degree(&self) -> isize {
        self.coeffs.len() as isize - 1
    }

    /// Evaluate polynomial at point.
    pub fn evaluate(&self, x: FieldElement) -> FieldElement {
        // Horner's method
        self.coeffs
            .iter()
            .rev()
            .fold(FieldElement::default(), |acc, coeff| acc * x + *coeff)
    }

    /// Strip trailing zero coefficients.
    fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.value() == 0) {
            self.coeffs.pop();
        }
    }
}
