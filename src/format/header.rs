//! oDrive 加密文件 Header 实现
//!
//! 本模块定义并实现 oDrive 加密文件格式中的 Header 部分。
//!
//! Header 的职责：
//! - 指明版本号（当前仅作占位，不参与分支）
//! - 提供密钥派生所需的 salt
//! - 提供 AES-CBC 所需的 IV
//!
//! Header 是整个加密文件的"格式锚点"：
//! - 解密前必须完整读取 Header
//! - 输入不足 Header 长度时，必须立即拒绝继续处理
//!
//! 字节布局为固定结构（偏移以字节计）：
//!
//! | 偏移 | 长度 | 字段    |
//! |------|------|---------|
//! | 0    | 1    | version |
//! | 1    | 8    | salt    |
//! | 9    | 16   | IV      |

use std::io::{Read, Write};

use crate::error::DecryptError;

/// 版本字段长度（字节）
pub const VERSION_SIZE: usize = 1;

/// KDF 使用的 salt 长度（字节）
pub const SALT_SIZE: usize = 8;

/// AES-CBC IV 长度（字节）
pub const IV_SIZE: usize = 16;

/// Header 固定大小
///
/// 1  (version)
/// 8  (salt)
/// 16 (iv)
pub const HEADER_SIZE: usize = VERSION_SIZE + SALT_SIZE + IV_SIZE;

/// 目前已知的唯一磁盘格式版本号
///
/// 加密工具只存在一个已知版本，version 字节不参与任何分支；
/// 遇到其它取值时仅通过日志提示，不拒绝文件。
pub const KNOWN_VERSION: u8 = 1;

/// oDrive Header 结构
///
/// 该结构仅表示 Header 的"语义内容"，
/// 具体的字节序列化由 read / write 方法负责。
/// 解析完成后即不可变。
#[derive(Debug, Clone)]
pub struct Header {
    pub version: u8,
    pub salt: [u8; SALT_SIZE],
    pub iv: [u8; IV_SIZE],
}

impl Header {
    /// 创建新的 Header
    ///
    /// 解密路径不需要该函数；保留给构造测试样本的配套加密器使用。
    pub fn new(version: u8, salt: [u8; SALT_SIZE], iv: [u8; IV_SIZE]) -> Self {
        Self { version, salt, iv }
    }

    /// 将 Header 写入输出流
    ///
    /// 写入顺序和字节布局必须严格遵循磁盘格式。
    pub fn write<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        // version
        writer.write_all(&[self.version])?;

        // salt
        writer.write_all(&self.salt)?;

        // iv
        writer.write_all(&self.iv)?;

        Ok(())
    }

    /// 从输入流读取并解析 Header
    ///
    /// 要求从偏移 0 起恰好能读出 [`HEADER_SIZE`] 字节；
    /// 输入更短（文件被截断）时返回 [`DecryptError::InvalidHeader`]。
    ///
    /// version 字节不做任何取值校验（向前兼容占位），
    /// 非 [`KNOWN_VERSION`] 的取值仅记录一条 warn 日志。
    pub fn read<R: Read>(mut reader: R) -> Result<Self, DecryptError> {
        let mut buf = [0u8; HEADER_SIZE];
        if let Err(e) = reader.read_exact(&mut buf) {
            return match e.kind() {
                std::io::ErrorKind::UnexpectedEof => Err(DecryptError::InvalidHeader),
                _ => Err(DecryptError::Io(e)),
            };
        }

        let version = buf[0];

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&buf[VERSION_SIZE..VERSION_SIZE + SALT_SIZE]);

        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&buf[VERSION_SIZE + SALT_SIZE..HEADER_SIZE]);

        if version != KNOWN_VERSION {
            tracing::warn!(version, "unexpected header version byte, proceeding anyway");
        }

        Ok(Self { version, salt, iv })
    }
}
