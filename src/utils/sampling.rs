//! 随机抽样
//!
//! 抽卡与仪表盘的随机选择都经过 [`RandomSource`]，测试中可以换成固定种子，
//! 从而断言具体抽中了哪些卡。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// 随机数来源
pub trait RandomSource: Send + Sync {
    /// 返回一个独立的随机数生成器，供单次抽样使用
    fn rng(&self) -> StdRng;
}

/// 默认来源：每次从系统熵初始化
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl RandomSource for EntropySource {
    fn rng(&self) -> StdRng {
        StdRng::from_entropy()
    }
}

/// 固定种子来源：同一种子产生相同的抽样序列
#[derive(Debug)]
pub struct SeededSource {
    inner: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededSource {
    fn rng(&self) -> StdRng {
        let next_seed = match self.inner.lock() {
            Ok(mut rng) => rng.r#gen::<u64>(),
            // 锁中毒只说明别的线程 panic 过，种子序列照常推进
            Err(poisoned) => poisoned.into_inner().r#gen::<u64>(),
        };
        StdRng::seed_from_u64(next_seed)
    }
}

/// 无放回均匀抽取 k 个元素，结果顺序随机。
/// k 大于 pool 长度时返回打乱后的全部元素。
pub fn sample_without_replacement<T, R>(pool: &[T], k: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let amount = k.min(pool.len());
    rand::seq::index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_is_distinct_and_sized() {
        let pool: Vec<i64> = (1..=10).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = sample_without_replacement(&pool, 3, &mut rng);
            assert_eq!(picked.len(), 3);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(picked.iter().all(|v| pool.contains(v)));
        }
    }

    #[test]
    fn test_sample_clamps_to_pool_size() {
        let pool = vec!["a", "b"];
        let mut rng = StdRng::seed_from_u64(1);
        let mut picked = sample_without_replacement(&pool, 3, &mut rng);
        picked.sort();
        assert_eq!(picked, vec!["a", "b"]);

        let empty: Vec<u8> = Vec::new();
        assert!(sample_without_replacement(&empty, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let pool: Vec<u32> = (0..20).collect();
        let a = SeededSource::new(99);
        let b = SeededSource::new(99);
        for _ in 0..5 {
            assert_eq!(
                sample_without_replacement(&pool, 3, &mut a.rng()),
                sample_without_replacement(&pool, 3, &mut b.rng())
            );
        }
    }

    #[test]
    fn test_every_element_can_be_drawn() {
        let pool: Vec<u8> = (0..5).collect();
        let source = SeededSource::new(3);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.extend(sample_without_replacement(&pool, 3, &mut source.rng()));
        }
        assert_eq!(seen.len(), pool.len());
    }
}
