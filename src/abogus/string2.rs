//! String-2：带时间戳的载荷。
//!
//! 把参数摘要、起止时间戳与若干固定常量按固定位置填入 44 位的骨架数组，
//! 计算异或校验值，追加浏览器指纹与校验值后用 RC4 加密。

use tracing::debug;

use crate::abogus::encoding::from_char_codes;
use crate::abogus::params_code::generate_params_code;
use crate::crypto::ByteWord;
use crate::crypto::rc4::rc4_encrypt;
use crate::entropy::EntropySource;
use crate::error::Result;

/// 骨架数组长度。
pub const PAYLOAD_LEN: usize = 44;

/// 代入骨架的计算值个数。
pub const ARG_COUNT: usize = 17;

/// 加密载荷所用的 RC4 密钥。
pub const RC4_KEY: &str = "y";

/// 时间抖动的取值范围（毫秒，闭区间）。
pub const JITTER_RANGE: std::ops::RangeInclusive<u32> = 4..=8;

const FILLER_40: ByteWord = 40;
const FILLER_49: ByteWord = 49;
const FILLER_251: ByteWord = 251;
const FILLER_167: ByteWord = 167;
const FILLER_67: ByteWord = 67;

#[derive(Debug, Clone, Copy)]
enum Slot {
    Lit(ByteWord),
    Arg(usize),
}

use Slot::{Arg, Lit};

/// 骨架布局：`Lit` 为固定值，`Arg(n)` 为第 n 个计算值。
const LAYOUT: [Slot; PAYLOAD_LEN] = [
    Lit(44),
    Arg(0),
    Lit(0),
    Lit(0),
    Lit(0),
    Lit(0),
    Lit(24),
    Arg(1),
    Arg(12),
    Lit(0),
    Arg(2),
    Arg(3),
    Lit(0),
    Lit(0),
    Lit(0),
    Lit(1),
    Lit(0),
    Lit(239),
    Arg(4),
    Arg(13),
    Arg(5),
    Arg(6),
    Lit(0),
    Lit(0),
    Lit(0),
    Lit(0),
    Arg(7),
    Lit(0),
    Lit(0),
    Lit(14),
    Arg(8),
    Arg(9),
    Lit(0),
    Arg(10),
    Arg(11),
    Lit(3),
    Arg(14),
    Lit(1),
    Arg(15),
    Lit(1),
    Arg(16),
    Lit(0),
    Lit(0),
    Lit(0),
];

/// 一次签名使用的起止时间戳，`end_ms = start_ms + jitter`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPair {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl TimestampPair {
    #[must_use]
    pub const fn new(start_ms: u64, jitter: u32) -> Self {
        Self {
            start_ms,
            end_ms: start_ms + jitter as u64,
        }
    }

    /// 读取当前时间并抽取抖动值。
    pub fn draw<E: EntropySource + ?Sized>(entropy: &mut E) -> Self {
        let start_ms = entropy.current_time_millis();
        let jitter = entropy.next_int(JITTER_RANGE);
        debug!(start_ms, jitter, "生成时间戳");
        Self::new(start_ms, jitter)
    }
}

const fn byte_at(value: u64, shift: u32) -> ByteWord {
    ((value >> shift) & 0xFF) as ByteWord
}

/// 第 32 位以上的部分。由连续整除得到，不做 `& 0xFF` 截断，
/// 当前时间戳下其值大于 255。
const fn high_part(value: u64) -> ByteWord {
    (value / 256 / 256 / 256 / 256) as ByteWord
}

/// 按固定布局把 17 个计算值代入骨架。
#[must_use]
pub fn list4(args: [ByteWord; ARG_COUNT]) -> [ByteWord; PAYLOAD_LEN] {
    LAYOUT.map(|slot| match slot {
        Lit(value) => value,
        Arg(index) => args[index],
    })
}

/// 由查询字符串与时间戳构造 44 位载荷数组。
#[must_use]
pub fn generate_string2_list(url_params: &str, timestamps: TimestampPair) -> [ByteWord; PAYLOAD_LEN] {
    let TimestampPair { start_ms, end_ms } = timestamps;
    let params_array = generate_params_code(url_params);

    list4([
        byte_at(end_ms, 24),
        params_array[21],
        FILLER_40,
        byte_at(end_ms, 16),
        params_array[22],
        FILLER_49,
        byte_at(end_ms, 8),
        byte_at(end_ms, 0),
        byte_at(start_ms, 24),
        byte_at(start_ms, 16),
        byte_at(start_ms, 8),
        byte_at(start_ms, 0),
        FILLER_251,
        FILLER_167,
        high_part(end_ms),
        high_part(start_ms),
        FILLER_67,
    ])
}

/// 所有元素依次异或得到的校验值，空输入为 0。
#[must_use]
pub fn end_check_num(values: &[ByteWord]) -> ByteWord {
    values.iter().fold(0, |acc, &v| acc ^ v)
}

/// 追加指纹与校验值，转换为字符码后用 RC4 加密。
pub fn generate_string2_inner(
    list: &[ByteWord],
    browser_code: &[ByteWord],
) -> Result<Vec<ByteWord>> {
    let check_num = end_check_num(list);

    let mut buffer = Vec::with_capacity(list.len() + browser_code.len() + 1);
    buffer.extend_from_slice(list);
    buffer.extend_from_slice(browser_code);
    buffer.push(check_num);

    let plaintext = from_char_codes(&buffer)?;
    rc4_encrypt(&plaintext, RC4_KEY)
}

/// 生成 String-2。会消耗一次时钟读取与一次 `next_int`。
pub fn generate_string2<E: EntropySource + ?Sized>(
    url_params: &str,
    browser_code: &[ByteWord],
    entropy: &mut E,
) -> Result<Vec<ByteWord>> {
    let timestamps = TimestampPair::draw(entropy);
    let list = generate_string2_list(url_params, timestamps);
    generate_string2_inner(&list, browser_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abogus::encoding::{BROWSER_FINGERPRINT, fingerprint_codes};
    use crate::entropy::FixedEntropy;

    const GOLDEN_LIST: [ByteWord; PAYLOAD_LEN] = [
        44, 207, 0, 0, 0, 0, 24, 198, 251, 0, 40, 229, 0, 0, 0, 1, 0, 239, 123, 167, 49, 104, 0,
        0, 0, 0, 5, 0, 0, 14, 207, 229, 0, 104, 0, 3, 395, 1, 395, 1, 67, 0, 0, 0,
    ];

    #[test]
    fn test_layout_substitutes_seventeen_args() {
        let args: [ByteWord; ARG_COUNT] = std::array::from_fn(|i| 1000 + i as ByteWord);
        let list = list4(args);

        let substituted = list.iter().filter(|&&v| v >= 1000).count();
        assert_eq!(substituted, ARG_COUNT);
        assert_eq!(list[1], 1000);
        assert_eq!(list[8], 1012);
        assert_eq!(list[40], 1016);
    }

    #[test]
    fn test_golden_list() {
        let timestamps = TimestampPair::new(1_700_000_000_000, 5);
        assert_eq!(timestamps.end_ms, 1_700_000_000_005);
        assert_eq!(generate_string2_list("a=1&b=2", timestamps), GOLDEN_LIST);
    }

    #[test]
    fn test_end_check_num_identities() {
        assert_eq!(end_check_num(&[]), 0);
        assert_eq!(end_check_num(&[173]), 173);
        assert_eq!(end_check_num(&[0b1100, 0b1010]), 0b0110);
        assert_eq!(end_check_num(&GOLDEN_LIST), 105);
    }

    #[test]
    fn test_string2_length_and_prefix() {
        let browser_code = fingerprint_codes(BROWSER_FINGERPRINT).unwrap();
        let mut entropy = FixedEntropy::new(Vec::new(), 1_700_000_000_000, 5);
        let string2 = generate_string2("a=1&b=2", &browser_code, &mut entropy).unwrap();

        assert_eq!(string2.len(), PAYLOAD_LEN + browser_code.len() + 1);
        assert_eq!(&string2[..8], &[105, 75, 164, 66, 132, 231, 81, 243]);
    }

    #[test]
    fn test_rc4_recovers_payload() {
        let browser_code = fingerprint_codes(BROWSER_FINGERPRINT).unwrap();
        let cipher = generate_string2_inner(&GOLDEN_LIST, &browser_code).unwrap();
        let plain = rc4_encrypt(&cipher, RC4_KEY).unwrap();

        assert_eq!(&plain[..PAYLOAD_LEN], &GOLDEN_LIST);
        assert_eq!(&plain[PAYLOAD_LEN..plain.len() - 1], browser_code.as_slice());
        assert_eq!(plain.last(), Some(&105));
    }
}
