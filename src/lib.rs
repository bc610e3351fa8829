mod decrypt;
mod verify;

pub mod crypto;
pub mod error;
pub mod format;

pub use error::DecryptError;

use std::path::Path;

/// 解密一个 oDrive 加密文件并校验其完整性
///
/// 成功返回时，`output` 处的文件即通过完整性校验的明文；
/// 任何其它结果都不会在 `output` 处留下新文件。
///
/// `output` 必须不同于 `input`，不支持原地解密。
pub fn decrypt(
    input: &Path,
    passphrase: &str,
    output: &Path,
) -> Result<(), DecryptError> {
    decrypt::decrypt_file(input, passphrase, output)
}
