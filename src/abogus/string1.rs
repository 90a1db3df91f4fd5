//! String-1：由三组随机数与掩码常量生成的 12 个字符码。

use crate::crypto::ByteWord;
use crate::entropy::EntropySource;

/// 一组随机值所用的掩码与填充常量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSet {
    pub b: ByteWord,
    pub c: ByteWord,
    pub d: ByteWord,
    pub e: ByteWord,
    pub f: ByteWord,
    pub g: ByteWord,
}

/// 第一组：`(170, 85, 1, 2, 5, 45 & 170)`。
#[allow(clippy::decimal_bitwise_operands)]
pub const LIST1_MASKS: MaskSet = MaskSet {
    b: 170,
    c: 85,
    d: 1,
    e: 2,
    f: 5,
    g: 45 & 170,
};

/// 第二组：`(170, 85, 1, 0, 0, 0)`。
pub const LIST2_MASKS: MaskSet = MaskSet {
    b: 170,
    c: 85,
    d: 1,
    e: 0,
    f: 0,
    g: 0,
};

/// 第三组：`(170, 85, 1, 0, 5, 0)`。
pub const LIST3_MASKS: MaskSet = MaskSet {
    b: 170,
    c: 85,
    d: 1,
    e: 0,
    f: 5,
    g: 0,
};

/// String-1 的长度。
pub const STRING1_LEN: usize = 12;

const MAX_UTF16_CODE: ByteWord = 0xFFFF;

/// 抽取一个随机数并与掩码组合成 4 个值。
pub fn random_list<E: EntropySource + ?Sized>(entropy: &mut E, masks: MaskSet) -> [ByteWord; 4] {
    let r = (entropy.next_double() * 10000.0) as ByteWord;
    let v0 = r & 0xFF;
    let v1 = r >> 8;

    [
        (v0 & masks.b) | masks.d,
        (v0 & masks.c) | masks.e,
        (v1 & masks.b) | masks.f,
        (v1 & masks.c) | masks.g,
    ]
}

/// 生成 String-1。会依次消耗三次 `next_double`。
pub fn generate_string1<E: EntropySource + ?Sized>(entropy: &mut E) -> Vec<ByteWord> {
    [LIST1_MASKS, LIST2_MASKS, LIST3_MASKS]
        .into_iter()
        .flat_map(|masks| random_list(entropy, masks))
        .map(|code| code.min(MAX_UTF16_CODE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{FixedEntropy, SystemEntropy};

    #[test]
    fn test_fixed_draws() {
        let mut entropy = FixedEntropy::new([0.123_456, 0.654_321, 0.999], 0, 4);
        assert_eq!(
            generate_string1(&mut entropy),
            vec![131, 82, 5, 44, 139, 5, 8, 17, 3, 4, 39, 5]
        );
    }

    #[test]
    fn test_zero_draws_expose_constants() {
        let mut entropy = FixedEntropy::new([0.0], 0, 4);
        assert_eq!(
            generate_string1(&mut entropy),
            vec![1, 2, 5, 40, 1, 0, 0, 0, 1, 0, 5, 0]
        );
    }

    #[test]
    fn test_random_output_shape() {
        let mut entropy = SystemEntropy::new();
        for _ in 0..200 {
            let codes = generate_string1(&mut entropy);
            assert_eq!(codes.len(), STRING1_LEN);
            assert!(codes.iter().all(|&c| c <= 0xFF), "String-1 应只包含单字节值");
            assert_eq!(codes[0] & 1, 1);
        }
    }
}
