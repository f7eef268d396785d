//! 金额值对象

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// 英镑金额
///
/// 业务规则:
/// - 以浮点保存，`round_to_minor_unit` 舍入到便士 (两位小数)
/// - 按合同逐笔舍入后再求和，而不是对总和舍入
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Money(f64);

impl Money {
    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// 舍入到两位小数
    pub fn round_to_minor_unit(&self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_minor_unit() {
        assert_eq!(Money::new(498.630_136).round_to_minor_unit(), Money::new(498.63));
        assert_eq!(Money::new(0.005).round_to_minor_unit().amount(), 0.01);
    }

    #[test]
    fn test_sum_and_display() {
        let total: Money = [Money::new(100.25), Money::new(0.5)].into_iter().sum();
        assert_eq!(format!("{}", total), "£100.75");
    }
}
