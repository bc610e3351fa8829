//! oDrive 解密流水线实现
//!
//! 本模块负责把一个 oDrive 加密文件还原并校验为原始文件。
//!
//! 解密流程（严格顺序，各阶段的返回值即下一阶段的输入）：
//! 1. 拒绝输入路径与输出路径相同（不支持原地解密）
//! 2. 读取 Header（version / salt / IV）
//! 3. 使用 Header 中的 salt + 口令派生 AES 密钥
//! 4. 从 Header 之后流式解密密文到输出文件
//! 5. 取出并截断尾部 hash，重算并校验
//!
//! 注意：
//! - 失败清理策略由本模块统一持有：输出文件一旦创建，
//!   之后任何阶段失败都会尽力删除它；删除失败只记日志，
//!   不覆盖原始错误
//! - 清理只覆盖输出文件可能已被创建之后的阶段，
//!   更早的失败不碰输出路径上既有的文件
//! - 只有截断且 hash 比对通过后才报告成功；输出路径上
//!   绝不把"未截断、未校验"的中间态当作成功结果留下
//! - 派生密钥在流式解密完成后立即丢弃（zeroize）
//! - 阶段之间不共享可变状态；单次调用独占自己的句柄与缓冲区

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use zeroize::Zeroizing;

use crate::crypto::kdf::{self, KEY_SIZE};
use crate::error::DecryptError;
use crate::format::header::{Header, IV_SIZE};
use crate::format::stream::StreamDecryptor;
use crate::verify;

/// 使用口令解密并校验文件
pub fn decrypt_file(
    input_path: &Path,
    passphrase: &str,
    output_path: &Path,
) -> Result<(), DecryptError> {
    // ---------- 路径检查（不支持原地解密） ----------
    if is_same_file(input_path, output_path)? {
        return Err(DecryptError::OutputEqualsInput);
    }

    // ---------- 打开输入文件，读取 Header ----------
    let input = File::open(input_path)?;
    let mut reader = BufReader::new(input);

    let header = Header::read(&mut reader)?;

    // ---------- KDF 派生密钥 ----------
    let key = kdf::derive_key(passphrase, &header.salt)?;

    // 从这里开始输出文件可能已被创建，失败必须清理
    let result = decrypt_and_verify(reader, key, &header.iv, output_path);

    if result.is_err() && output_path.exists() {
        if let Err(remove_err) = fs::remove_file(output_path) {
            tracing::warn!(
                path = %output_path.display(),
                error = %remove_err,
                "failed to remove output file after error",
            );
        }
    }

    result
}

/// 流式解密 + 完整性校验
///
/// reader 已定位到密文起始偏移（Header 之后）。
/// key 按值传入，流式解密一结束就 drop（Zeroizing 负责清零）。
fn decrypt_and_verify<R: Read>(
    mut reader: R,
    key: Zeroizing<[u8; KEY_SIZE]>,
    iv: &[u8; IV_SIZE],
    output_path: &Path,
) -> Result<(), DecryptError> {
    // ---------- 流式解密到输出文件 ----------
    {
        let output = File::create(output_path)?;
        let mut writer = BufWriter::new(output);

        let mut decryptor = StreamDecryptor::new(&key, iv);
        decryptor.decrypt(&mut reader, &mut writer)?;
    }

    // 密钥用完即弃；输入句柄也在校验阶段开始前释放
    drop(key);
    drop(reader);

    // ---------- 校验尾部 hash 并截断 ----------
    verify::verify_and_truncate(output_path)?;

    Ok(())
}

/// 判断两个路径是否指向同一个文件
///
/// 输出文件可能尚不存在，此时视为不同路径；
/// 输入文件必须存在，canonicalize 失败按 I/O 错误上抛。
fn is_same_file(input_path: &Path, output_path: &Path) -> Result<bool, DecryptError> {
    if input_path == output_path {
        return Ok(true);
    }

    let input_canonical = fs::canonicalize(input_path)?;

    match fs::canonicalize(output_path) {
        Ok(output_canonical) => Ok(input_canonical == output_canonical),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(DecryptError::Io(e)),
    }
}
