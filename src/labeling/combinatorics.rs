//! 候选总数公式
//!
//! 全部为精确整数运算（u128），按乘法逐项累积而不是先算阶乘再相除；
//! 超出 u128 时饱和到 `u128::MAX`，调用方将其视为"无法枚举"。

/// n!，`0! = 1`
pub fn factorial(n: usize) -> u128 {
    (1..=n as u128).fold(1u128, |acc, i| acc.saturating_mul(i))
}

/// n! / (n - r)!，r > n 时为 0
pub fn permutations(n: usize, r: usize) -> u128 {
    if r > n {
        return 0;
    }
    ((n - r + 1) as u128..=n as u128).fold(1u128, |acc, i| acc.saturating_mul(i))
}

/// n! / (k! (n - k)!)，k > n 时为 0
pub fn combinations(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k as u128 {
        // acc * (n - i) 恰为 C(n, i + 1) * (i + 1)，整除无误差
        acc = match acc.checked_mul(n as u128 - i) {
            Some(v) => v / (i + 1),
            None => return u128::MAX,
        };
    }
    acc
}
