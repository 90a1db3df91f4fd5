//! 双重 SM3 摘要链。
//!
//! 第 0 层：`SM3(UTF-8(输入 + "cus"))`；
//! 第 1 层：把第 0 层的 32 个值按原始字节再做一次 SM3。
//! String-2 只使用第 1 层的结果。

use tracing::{debug, trace};

use crate::crypto::ByteWord;
use crate::crypto::hash::{DIGEST_LEN, sm3_hash};

/// 追加在摘要输入末尾的固定后缀。
pub const END_STRING: &str = "cus";

/// 字符串经 UTF-8 编码后做 SM3，摘要的每个字节作为一个元素。
#[must_use]
pub fn sm3_to_array_l0(data: &str) -> [ByteWord; DIGEST_LEN] {
    let digest = sm3_hash(data.as_bytes());
    trace!(digest = %hex::encode(digest), "第 0 层摘要");
    digest.map(ByteWord::from)
}

/// 取每个元素的低 8 位组成字节数组后做 SM3。
#[must_use]
pub fn sm3_to_array_l1(data: &[ByteWord]) -> [ByteWord; DIGEST_LEN] {
    let bytes: Vec<u8> = data.iter().map(|&v| v as u8).collect();
    let digest = sm3_hash(&bytes);
    trace!(digest = %hex::encode(digest), "第 1 层摘要");
    digest.map(ByteWord::from)
}

fn double_hash(input: &str) -> [ByteWord; DIGEST_LEN] {
    let l0_input = format!("{input}{END_STRING}");
    debug!(l0_input = %l0_input, "计算双重摘要");
    let l0_output = sm3_to_array_l0(&l0_input);
    sm3_to_array_l1(&l0_output)
}

/// 由编码后的查询字符串计算参数摘要数组。
#[must_use]
pub fn generate_params_code(params: &str) -> [ByteWord; DIGEST_LEN] {
    double_hash(params)
}

/// 由请求方法名计算方法摘要数组。
#[must_use]
pub fn generate_method_code(method: &str) -> [ByteWord; DIGEST_LEN] {
    double_hash(method)
}
