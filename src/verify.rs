//! oDrive 完整性校验与截断实现
//!
//! 解密输出暂时是 `明文 || SHA-256(明文)`（32 字节后缀）。
//! 本模块负责把尾部 hash 取出并截掉，再对剩余明文重算 hash 做比对。
//!
//! 校验流程（严格顺序）：
//! 1. stat 输出文件；小于 hash 长度即判定非法
//! 2. 显式 seek 到尾部，读出 32 字节存储 hash
//! 3. truncate 掉尾部 hash，只留明文
//! 4. 重新以只读方式打开，从头到尾流式重算 SHA-256
//! 5. 以常数时间比较两个 hash
//!
//! 注意：
//! - 读取/截断与重算 hash 使用各自独立获取、独立释放的句柄，
//!   不复用同一句柄跨阶段
//! - 校验失败时输出文件的删除由流水线控制器统一执行，
//!   本模块只负责判定

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::DecryptError;

/// 完整性 hash 长度（SHA-256，32 字节）
pub const HASH_SIZE: usize = 32;

/// 校验尾部 hash 并截断输出文件
///
/// 成功返回后，`output_path` 处的文件只含明文，且 hash 已验证通过。
///
/// #### 错误
/// - 文件短于 [`HASH_SIZE`]，或重算 hash 与存储 hash 不一致时
///   返回 [`DecryptError::InvalidHash`]
/// - 文件操作失败返回 [`DecryptError::Io`]
pub fn verify_and_truncate(output_path: &Path) -> Result<(), DecryptError> {
    // ---------- 取出尾部 hash 并截断 ----------
    let stored_hash = {
        let mut file = OpenOptions::new().read(true).write(true).open(output_path)?;

        let size = file.metadata()?.len();
        if size < HASH_SIZE as u64 {
            // 解密产物连 hash 都放不下，无从校验
            return Err(DecryptError::InvalidHash);
        }

        let plaintext_size = size - HASH_SIZE as u64;

        let mut stored_hash = [0u8; HASH_SIZE];
        file.seek(SeekFrom::Start(plaintext_size))?;
        file.read_exact(&mut stored_hash)?;

        // 截掉尾部 hash，只留明文
        file.set_len(plaintext_size)?;

        stored_hash
    };

    // ---------- 重算明文 hash ----------
    let computed_hash = {
        let mut file = File::open(output_path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        hasher.finalize()
    };

    // ---------- 常数时间比较 ----------
    if !bool::from(stored_hash[..].ct_eq(&computed_hash[..])) {
        return Err(DecryptError::InvalidHash);
    }

    Ok(())
}
