use thiserror::Error;

/// odrive-decrypt 错误类型
///
/// 每个变体对应解密流水线中一个明确的失败类别。
/// 所有错误对单次操作都是终止性的，内部不做重试。
#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 输入文件不足 Header 长度，无法读出完整 Header。
    #[error("invalid header")]
    InvalidHeader,

    /// KDF 底层原语拒绝参数（与口令是否正确无关）。
    #[error("key derivation failed")]
    KeyDerivation,

    /// 密文不合法：长度未按块对齐、为空或 PKCS#7 padding 损坏。
    #[error("decryption failed: {0}")]
    Decryption(&'static str),

    /// 解密输出短于 hash 长度，或重算 hash 与尾部存储 hash 不一致。
    #[error("invalid hash")]
    InvalidHash,

    /// 不支持原地解密：输出路径必须不同于输入路径。
    #[error("output path must differ from input path")]
    OutputEqualsInput,
}
