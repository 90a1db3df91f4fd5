//! 签名过程中的熵来源：随机数与系统时钟。
//!
//! 生产环境使用 [`SystemEntropy`]（线程本地随机数生成器与系统时间），
//! 测试中可以用 [`FixedEntropy`] 得到完全可复现的签名。

use std::ops::RangeInclusive;

use chrono::Utc;
use rand::{Rng, rngs::ThreadRng};
use tracing::warn;

/// 签名一次所需的全部熵。
///
/// 一次签名中的调用顺序固定为：三次 `next_double`（String-1），
/// 一次 `current_time_millis`，一次 `next_int(4..=8)`（String-2）。
pub trait EntropySource {
    /// 返回 `[0, 1)` 区间内的随机浮点数。
    fn next_double(&mut self) -> f64;

    /// 返回闭区间 `range` 内的随机整数。
    fn next_int(&mut self, range: RangeInclusive<u32>) -> u32;

    /// 返回当前的 Unix 毫秒时间戳。
    fn current_time_millis(&mut self) -> u64;
}

/// 基于线程本地随机数生成器与系统时钟的熵来源。
///
/// 每次签名都应创建新的实例，不要跨线程共享。
#[derive(Debug, Clone)]
pub struct SystemEntropy {
    rng: ThreadRng,
}

impl SystemEntropy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for SystemEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for SystemEntropy {
    fn next_double(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn next_int(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }

    fn current_time_millis(&mut self) -> u64 {
        unix_millis(Utc::now().timestamp_millis())
    }
}

/// 把时钟读数转换为无符号毫秒数，早于 Unix 纪元的读数饱和为 0。
fn unix_millis(millis: i64) -> u64 {
    u64::try_from(millis).unwrap_or_else(|_| {
        warn!(millis, "系统时钟早于 Unix 纪元，时间戳按 0 处理，生成的签名将无效");
        0
    })
}

/// 返回预设值的确定性熵来源。
///
/// `doubles` 按顺序循环取用，为空时返回 `0.0`；
/// `jitter` 会被限制在调用方给出的区间内。
#[derive(Debug, Clone, PartialEq)]
pub struct FixedEntropy {
    doubles: Vec<f64>,
    cursor: usize,
    now_millis: u64,
    jitter: u32,
}

impl FixedEntropy {
    #[must_use]
    pub fn new(doubles: impl Into<Vec<f64>>, now_millis: u64, jitter: u32) -> Self {
        Self {
            doubles: doubles.into(),
            cursor: 0,
            now_millis,
            jitter,
        }
    }
}

impl EntropySource for FixedEntropy {
    fn next_double(&mut self) -> f64 {
        if self.doubles.is_empty() {
            return 0.0;
        }
        let value = self.doubles[self.cursor % self.doubles.len()];
        self.cursor += 1;
        value
    }

    fn next_int(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.jitter.clamp(*range.start(), *range.end())
    }

    fn current_time_millis(&mut self) -> u64 {
        self.now_millis
    }
}
