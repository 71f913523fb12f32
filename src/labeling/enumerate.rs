//! 惰性候选枚举
//!
//! 候选以下标序列表示。排列按"固定当前位置、依次从剩余元素中选取"的递归顺序产出，
//! 即下标序列的字典序；组合按下标字典序产出。

/// r-排列枚举器
#[derive(Debug, Clone)]
pub struct Permutations {
    n: usize,
    indices: Vec<usize>,
    used: Vec<bool>,
    started: bool,
    done: bool,
}

impl Permutations {
    /// 从 n 个元素中取 r 个的全部排列；r > n 时为空序列，r = 0 时只有一个空排列
    pub fn new(n: usize, r: usize) -> Self {
        Self {
            n,
            indices: (0..r).collect(),
            used: (0..n).map(|i| i < r).collect(),
            started: false,
            done: r > n,
        }
    }

    fn advance(&mut self) -> bool {
        let r = self.indices.len();
        for pos in (0..r).rev() {
            let current = self.indices[pos];
            self.used[current] = false;

            if let Some(next) = (current + 1..self.n).find(|&j| !self.used[j]) {
                self.indices[pos] = next;
                self.used[next] = true;

                // 后续位置填入最小的未用下标
                let mut fill = pos + 1;
                for j in 0..self.n {
                    if fill == r {
                        break;
                    }
                    if !self.used[j] {
                        self.indices[fill] = j;
                        self.used[j] = true;
                        fill += 1;
                    }
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.indices.clone())
    }
}

/// k-组合枚举器
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// 从 n 个元素中取 k 个的全部组合；k > n 时为空序列，k = 0 时只有一个空组合
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.indices.clone())
    }
}

/// 搜索引擎使用的候选空间
#[derive(Debug, Clone)]
pub enum Candidates {
    Permutations(Permutations),
    Combinations(Combinations),
}

impl Iterator for Candidates {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Candidates::Permutations(p) => p.next(),
            Candidates::Combinations(c) => c.next(),
        }
    }
}
