//! 测试专用的配套加密器。
//!
//! 库本身只做解密；round-trip 等测试需要能按磁盘格式
//! 自己造出合法（或故意不合法）的加密文件。
//! 这里的常量与算法必须和库中的协议常量保持一致。

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockEncryptMut, KeyIvInit};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::{Digest, Sha256};

use odrive_decrypt::format::header::{Header, IV_SIZE, SALT_SIZE};

const KDF_ITERATIONS: u32 = 1000;

/// 加密任意 payload（不追加 hash），返回完整文件字节
///
/// 用于构造"解密产物短于 hash"之类的异常样本。
pub fn encrypt_raw_payload(
    payload: &[u8],
    passphrase: &str,
    version: u8,
    salt: [u8; SALT_SIZE],
    iv: [u8; IV_SIZE],
) -> Vec<u8> {
    let mut key = [0u8; 32];
    pbkdf2::<Hmac<Sha256>>(passphrase.as_bytes(), &salt, KDF_ITERATIONS, &mut key)
        .expect("derive key");

    let ciphertext = cbc::Encryptor::<Aes256>::new((&key).into(), (&iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(payload);

    let mut file = Vec::new();
    Header::new(version, salt, iv)
        .write(&mut file)
        .expect("write header");
    file.extend_from_slice(&ciphertext);
    file
}

/// 按磁盘格式加密明文：header || AES-256-CBC(明文 || SHA-256(明文))
pub fn encrypt_file_bytes(
    plaintext: &[u8],
    passphrase: &str,
    version: u8,
    salt: [u8; SALT_SIZE],
    iv: [u8; IV_SIZE],
) -> Vec<u8> {
    let mut payload = plaintext.to_vec();
    payload.extend_from_slice(&Sha256::digest(plaintext));

    encrypt_raw_payload(&payload, passphrase, version, salt, iv)
}
