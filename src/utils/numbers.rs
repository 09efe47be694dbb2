//! 号码生成、校验与比对

use std::collections::HashSet;

use rand::Rng;

pub const NUMBERS_PER_TICKET: usize = 6;
pub const MIN_NUMBER: u32 = 1;
pub const MAX_NUMBER: u32 = 49;

/// 从 1..=49 中无放回地均匀抽取 6 个号码（碰撞则重抽）
pub fn generate_winning_numbers<R: Rng>(rng: &mut R) -> Vec<u32> {
    let mut seen = HashSet::with_capacity(NUMBERS_PER_TICKET);
    let mut result = Vec::with_capacity(NUMBERS_PER_TICKET);

    while result.len() < NUMBERS_PER_TICKET {
        let n = rng.gen_range(MIN_NUMBER..=MAX_NUMBER);
        if seen.insert(n) {
            result.push(n);
        }
    }
    result
}

/// 恰好 6 个互不相同、且都在 1..=49 内的号码
pub fn validate_numbers(numbers: &[u32]) -> bool {
    if numbers.len() != NUMBERS_PER_TICKET {
        return false;
    }
    let mut seen = HashSet::with_capacity(NUMBERS_PER_TICKET);
    numbers
        .iter()
        .all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n) && seen.insert(*n))
}

/// 两组号码按集合求交后的个数
pub fn count_matches(ticket: &[u32], winning: &[u32]) -> u32 {
    let winning: HashSet<u32> = winning.iter().copied().collect();
    let ticket: HashSet<u32> = ticket.iter().copied().collect();
    ticket.intersection(&winning).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_numbers_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let numbers = generate_winning_numbers(&mut rng);
            assert_eq!(numbers.len(), 6);
            assert!(validate_numbers(&numbers), "invalid draw: {numbers:?}");
        }
    }

    #[test]
    fn test_generation_covers_whole_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut hit = HashSet::new();
        for _ in 0..2000 {
            hit.extend(generate_winning_numbers(&mut rng));
        }
        assert_eq!(hit.len(), 49);
        assert!(hit.contains(&1) && hit.contains(&49));
    }

    #[test]
    fn test_same_seed_same_numbers() {
        let a = generate_winning_numbers(&mut StdRng::seed_from_u64(1234));
        let b = generate_winning_numbers(&mut StdRng::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6]));
        assert!(validate_numbers(&[49, 1, 17, 23, 8, 30]));
        assert!(!validate_numbers(&[1, 2, 3, 4, 5, 5])); // 重复
        assert!(!validate_numbers(&[1, 2, 3, 4, 5, 50])); // 越界
        assert!(!validate_numbers(&[0, 2, 3, 4, 5, 6]));
        assert!(!validate_numbers(&[1, 2, 3, 4, 5]));
        assert!(!validate_numbers(&[1, 2, 3, 4, 5, 6, 7]));
        assert!(!validate_numbers(&[]));
    }

    #[test]
    fn test_count_matches() {
        assert_eq!(count_matches(&[1, 2, 3, 4, 5, 6], &[6, 5, 4, 3, 2, 1]), 6);
        assert_eq!(count_matches(&[1, 2, 3, 4, 5, 6], &[7, 8, 9, 10, 11, 12]), 0);
        assert_eq!(count_matches(&[1, 2, 3, 40, 41, 42], &[3, 2, 1, 7, 8, 9]), 3);
        assert_eq!(count_matches(&[], &[1, 2, 3]), 0);
        assert_eq!(count_matches(&[1, 2, 3, 4, 5, 6], &[]), 0);
    }

    #[test]
    fn test_count_matches_is_symmetric() {
        let a = [5, 10, 15, 20, 25, 30];
        let b = [30, 1, 15, 2, 5, 3];
        assert_eq!(count_matches(&a, &b), count_matches(&b, &a));
    }
}
