//! Right-tail probabilities for the Poisson and Binomial distributions.
//!
//! Both functions accumulate the left tail incrementally and return its
//! complement, so no factorials or binomial coefficients are materialized.
//! They are pure and allocation-free; the cluster policies call them once
//! per point.

/// P(X >= k) for X ~ Poisson(lambda).
///
/// Computed as `1 - exp(-lambda) * sum_{i=0}^{k-1} lambda^i / i!` with the
/// running term updated by `element *= lambda / i`.
///
/// The loop never executes for `k <= 1`, so `poisson_tail(0, l)` and
/// `poisson_tail(1, l)` both evaluate to `1 - exp(-lambda)`. Callers must
/// ensure `lambda > 0`; a zero or negative lambda is a precondition
/// violation and yields meaningless values.
pub fn poisson_tail(k: u32, lambda: f64) -> f64 {
    let mut sum = 1.0;
    let mut element = 1.0;
    for i in 1..k {
        element = element * lambda / i as f64;
        sum += element;
    }
    1.0 - sum * (-lambda).exp()
}

/// P(X >= n_success) for X ~ Binomial(n_success + n_failure, p).
///
/// The left tail is accumulated in log space to survive large populations:
/// `ln P(0) = n ln(q)` and `ln P(i) = ln P(i-1) + ln(n+1-i) + ln(p) - ln(i)
/// - ln(q)`, exponentiating each term before adding.
///
/// For `n_success == 0` the loop never executes and the result is
/// `1 - q^n` (the mass at zero is always part of the accumulated tail).
/// Callers must ensure `0 < p < 1`.
pub fn binomial_tail(n_success: u32, n_failure: u32, p: f64) -> f64 {
    let q = 1.0 - p;
    let n = (n_success + n_failure) as f64;
    let mut log_element = n * q.ln();
    let mut sum = log_element.exp();

    for i in 1..n_success {
        let i = i as f64;
        log_element += (n + 1.0 - i).ln() + p.ln() - i.ln() - q.ln();
        sum += log_element.exp();
    }
    1.0 - sum
}
