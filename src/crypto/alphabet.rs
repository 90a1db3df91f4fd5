//! 使用私有字母表的类 Base64 编码器。
//!
//! 每 3 个字符码打包为一个 24 位整数，再按 18/12/6/0 位移拆成 4 个 6 位索引。
//! 与标准 Base64 不同，末尾不足 3 个时先省略多余的符号，
//! 最后再统一用 `=` 补齐到 4 的倍数。

use crate::crypto::ByteWord;

/// 编码使用的 64 字符表。
pub const CHAR_TABLE: &[u8; 64] =
    b"Dkdpgh2ZmsQB80/MfvV36XI1R45-WUAlEixNLwoqYTOPuzKFjJnry79HbGcaStCe";

/// 补齐字符。
pub const PADDING: char = '=';

const SHIFTS: [u32; 4] = [18, 12, 6, 0];
const MASKS: [u32; 4] = [0xFC_0000, 0x03_F000, 0x0FC0, 0x3F];

/// 将字符码序列编码为签名字符串。
///
/// 输入的每个元素按字符码参与打包，超过 8 位的部分会与相邻元素的位重叠，
/// 最终被掩码截掉，这与参考实现的行为一致。
#[must_use]
pub fn encode(codes: &[ByteWord]) -> String {
    let len = codes.len();
    let mut out = String::with_capacity(len.div_ceil(3) * 4);

    for i in (0..len).step_by(3) {
        let n = if i + 2 < len {
            (codes[i] << 16) | (codes[i + 1] << 8) | codes[i + 2]
        } else if i + 1 < len {
            (codes[i] << 16) | (codes[i + 1] << 8)
        } else {
            codes[i] << 16
        };

        for (&shift, &mask) in SHIFTS.iter().zip(MASKS.iter()) {
            if shift == 6 && i + 1 >= len {
                break;
            }
            if shift == 0 && i + 2 >= len {
                break;
            }
            let index = ((n & mask) >> shift) as usize;
            out.push(char::from(CHAR_TABLE[index]));
        }
    }

    let padding = (4 - out.len() % 4) % 4;
    out.extend(std::iter::repeat_n(PADDING, padding));
    out
}
