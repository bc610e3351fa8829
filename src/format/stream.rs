//! oDrive 密文流（Stream）解密实现
//!
//! 本模块负责 oDrive 加密文件中 Header 之后"数据流"部分的解密。
//!
//! 职责范围：
//! - 从 reader 按固定大小的 chunk 增量读取密文（不整文件读入内存）
//! - 使用 AES-256-CBC 逐块解密，内部维护链接状态
//! - 在 EOF 处剥除 PKCS#7 padding，并将明文顺序写入 writer
//!
//! 设计前提与约束：
//! - Header 已负责提供：派生密钥、IV；caller 负责把 reader 定位到
//!   密文起始偏移
//! - 密文总长必须是块大小的整数倍，且至少含一个块（padding 块）
//! - 最后一个密文块在确认 EOF 前必须暂存，不能提前写出——
//!   只有它携带 padding
//! - 本模块不负责输出文件的失败清理，该策略由流水线控制器统一持有

use std::io::{Read, Write};

use aes::Aes256;
use cbc::cipher::block_padding::{Pkcs7, RawPadding};
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};

use crate::crypto::kdf::KEY_SIZE;
use crate::error::DecryptError;
use crate::format::header::IV_SIZE;

// AES 块大小，固定为 16 字节
const BLOCK_SIZE: usize = 16;

// 每次从输入读取的密文 chunk 大小：64 KiB（块大小的整数倍）
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// 流式解密器
///
/// 负责将密文数据流按 chunk 解密并写入输出流。
/// 一次实例只服务一次解密操作，不可复用。
pub struct StreamDecryptor {
    cipher: cbc::Decryptor<Aes256>,
}

impl StreamDecryptor {
    /// 创建新的 StreamDecryptor
    ///
    /// - key: 32 字节 AES 密钥（来自 KDF）
    /// - iv: Header 中携带的 16 字节 IV
    pub fn new(key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Self {
        Self {
            cipher: cbc::Decryptor::new(key.into(), iv.into()),
        }
    }

    /// 从 reader 读取密文数据流，解密后写入 writer
    ///
    /// 返回写出的明文字节数（已剥除 padding）。
    ///
    /// #### 错误
    /// - 密文为空、总长未按 16 字节对齐、或 PKCS#7 padding 非法时
    ///   返回 [`DecryptError::Decryption`]
    /// - 读写失败返回 [`DecryptError::Io`]
    pub fn decrypt<R: Read, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<u64, DecryptError> {
        let mut buffer = vec![0u8; DEFAULT_CHUNK_SIZE];

        // 暂存的最后一个已解密块；确认后面还有数据时才写出
        let mut held_block: Option<[u8; BLOCK_SIZE]> = None;
        let mut bytes_written: u64 = 0;

        loop {
            let read_len = read_chunk(&mut reader, &mut buffer)?;
            if read_len == 0 {
                break;
            }

            if read_len % BLOCK_SIZE != 0 {
                return Err(DecryptError::Decryption(
                    "ciphertext length is not a multiple of the block size",
                ));
            }

            for block in buffer[..read_len].chunks_exact_mut(BLOCK_SIZE) {
                if let Some(previous) = held_block.take() {
                    writer.write_all(&previous)?;
                    bytes_written += BLOCK_SIZE as u64;
                }

                self.cipher
                    .decrypt_block_mut(GenericArray::from_mut_slice(block));

                let mut plaintext_block = [0u8; BLOCK_SIZE];
                plaintext_block.copy_from_slice(block);
                held_block = Some(plaintext_block);
            }
        }

        // 最后一个块携带 padding，在 EOF 处剥除后写出
        let last_block =
            held_block.ok_or(DecryptError::Decryption("ciphertext is empty"))?;

        let plaintext = Pkcs7::raw_unpad(&last_block)
            .map_err(|_| DecryptError::Decryption("invalid PKCS#7 padding"))?;

        writer.write_all(plaintext)?;
        bytes_written += plaintext.len() as u64;

        writer.flush()?;

        Ok(bytes_written)
    }
}

/// 尽量填满 buffer，返回实际读到的字节数
///
/// 短读在普通 `Read` 上是合法的，这里循环补齐直到 buffer 满或 EOF，
/// 保证 chunk 边界对齐检查不被短读干扰。
fn read_chunk<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;

    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
