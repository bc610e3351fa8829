//! oDrive 密钥派生函数（KDF）模块
//!
//! 本模块负责将用户输入的口令，通过 PBKDF2-HMAC-SHA-256 算法
//! 派生为对称加密密钥，用于后续 AES-256-CBC 解密。
//!
//! 设计前提：
//! - 迭代次数与输出长度是协议常量，必须与原始加密工具完全一致
//! - 参数不暴露为运行时配置：一旦不一致，派生出的就是错误密钥，
//!   下游只会得到乱码明文或 hash 校验失败，没有任何协商机制
//! - 敏感密钥材料在离开作用域后自动清零
//!
//! 输出：
//! - 32 字节密钥（256-bit，适用于 AES-256）

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::DecryptError;
use crate::format::header::SALT_SIZE;

/// 派生密钥长度（256-bit）
pub const KEY_SIZE: usize = 32;

/// PBKDF2 迭代次数（oDrive 加密工具固定使用 1000）
///
/// 协议常量，严禁调整：取值错误不会报错，
/// 只会静默产生错误密钥。
pub const KDF_ITERATIONS: u32 = 1000;

/// 根据口令和 salt 派生对称解密密钥
///
/// #### 参数
/// - `passphrase`：用户输入的口令（UTF-8）
/// - `salt`：Header 中携带的该文件 salt
///
/// #### 返回
/// - 32 字节派生密钥（自动 zeroize）
///
/// #### 错误
/// - 仅当底层原语拒绝参数组合时返回 [`DecryptError::KeyDerivation`]；
///   口令错误在本阶段不会失败，只会在下游表现为
///   padding 损坏或 hash 校验不通过。
pub fn derive_key(
    passphrase: &str,
    salt: &[u8; SALT_SIZE],
) -> Result<Zeroizing<[u8; KEY_SIZE]>, DecryptError> {
    // 使用 Zeroizing 包装，确保密钥在作用域结束后被清零
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);

    pbkdf2::<Hmac<Sha256>>(passphrase.as_bytes(), salt, KDF_ITERATIONS, &mut key[..])
        .map_err(|_| DecryptError::KeyDerivation)?;

    Ok(key)
}
