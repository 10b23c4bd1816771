//! Closed-form least squares for a first-degree polynomial.

use serde::{Deserialize, Serialize};

use crate::error::{SurrogateError, SurrogateResult};

/// `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
    /// Root-mean-square residual over the fitted samples
    pub residual_rms: f64,
}

impl LinearFit {
    /// Fit a line through `(x, y)` minimizing the sum of squared residuals.
    ///
    /// `what` names the fitted quantity in errors.
    pub fn least_squares(what: &'static str, x: &[f64], y: &[f64]) -> SurrogateResult<Self> {
        let fail = |reason| SurrogateError::Fit { what, reason };
        if x.len() != y.len() {
            return Err(fail("abscissa and ordinate lengths differ"));
        }
        if x.len() < 2 {
            return Err(fail("at least two samples are required"));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(fail("samples must be finite"));
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;
        let (sxx, sxy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (xi, yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });
        if sxx <= f64::EPSILON * n * (x_mean * x_mean).max(1.0) {
            return Err(fail("fewer than two distinct abscissae"));
        }

        let slope = sxy / sxx;
        let mut fit = Self {
            intercept: y_mean - slope * x_mean,
            slope,
            residual_rms: 0.0,
        };
        fit.residual_rms = (fit.sum_squared_residuals(x, y) / n).sqrt();
        Ok(fit)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn sum_squared_residuals(&self, x: &[f64], y: &[f64]) -> f64 {
        x.iter()
            .zip(y)
            .map(|(xi, yi)| {
                let r = yi - self.evaluate(*xi);
                r * r
            })
            .sum()
    }
}
