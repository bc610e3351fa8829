mod common;

use std::fs;

use tempfile::tempdir;

use common::encrypt_file_bytes;

#[test]
fn decrypt_recovers_known_plaintext() {
    // 协议基准样本：version 0x01、全零 salt/IV、口令 "correct horse"，
    // 明文 "hello world" 应被逐字节还原。
    let temp_dir = tempdir().expect("create temp dir");
    let input_path = temp_dir.path().join("hello.enc");
    let output_path = temp_dir.path().join("hello.txt");

    let encrypted = encrypt_file_bytes(b"hello world", "correct horse", 1, [0u8; 8], [0u8; 16]);
    fs::write(&input_path, &encrypted).expect("write encrypted file");

    odrive_decrypt::decrypt(&input_path, "correct horse", &output_path).expect("decrypt file");

    let decrypted = fs::read(&output_path).expect("read decrypted");
    assert_eq!(decrypted, b"hello world");
}

#[test]
fn decrypt_roundtrip_spanning_multiple_chunks() {
    // 明文大于一个读取 chunk（64 KiB），验证跨 chunk 的
    // 块链接与末块暂存逻辑。
    let temp_dir = tempdir().expect("create temp dir");
    let input_path = temp_dir.path().join("big.enc");
    let output_path = temp_dir.path().join("big.bin");

    let plaintext: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let encrypted = encrypt_file_bytes(&plaintext, "chunky passphrase", 1, [7u8; 8], [9u8; 16]);
    fs::write(&input_path, &encrypted).expect("write encrypted file");

    odrive_decrypt::decrypt(&input_path, "chunky passphrase", &output_path)
        .expect("decrypt file");

    let decrypted = fs::read(&output_path).expect("read decrypted");
    assert_eq!(decrypted, plaintext);
}

#[test]
fn repeated_decrypt_produces_identical_output() {
    // 相同输入重复解密必须得到逐字节相同的明文。
    let temp_dir = tempdir().expect("create temp dir");
    let input_path = temp_dir.path().join("input.enc");
    let first_output = temp_dir.path().join("first.txt");
    let second_output = temp_dir.path().join("second.txt");

    let encrypted = encrypt_file_bytes(b"stable payload", "passphrase", 1, [3u8; 8], [5u8; 16]);
    fs::write(&input_path, &encrypted).expect("write encrypted file");

    odrive_decrypt::decrypt(&input_path, "passphrase", &first_output).expect("first decrypt");
    odrive_decrypt::decrypt(&input_path, "passphrase", &second_output).expect("second decrypt");

    let first = fs::read(&first_output).expect("read first");
    let second = fs::read(&second_output).expect("read second");
    assert_eq!(first, second);
    assert_eq!(first, b"stable payload");
}

#[test]
fn unknown_version_byte_is_accepted() {
    // version 字节是向前兼容占位，未知取值只提示、不拒绝。
    let temp_dir = tempdir().expect("create temp dir");
    let input_path = temp_dir.path().join("v7.enc");
    let output_path = temp_dir.path().join("v7.txt");

    let encrypted = encrypt_file_bytes(b"future format", "passphrase", 7, [1u8; 8], [2u8; 16]);
    fs::write(&input_path, &encrypted).expect("write encrypted file");

    odrive_decrypt::decrypt(&input_path, "passphrase", &output_path).expect("decrypt file");

    let decrypted = fs::read(&output_path).expect("read decrypted");
    assert_eq!(decrypted, b"future format");
}

#[test]
fn empty_plaintext_roundtrip() {
    // 空明文也是合法输入：密文只含一个 padding 块，
    // 解密产物为 hash 本身，截断后文件为空。
    let temp_dir = tempdir().expect("create temp dir");
    let input_path = temp_dir.path().join("empty.enc");
    let output_path = temp_dir.path().join("empty.txt");

    let encrypted = encrypt_file_bytes(b"", "passphrase", 1, [4u8; 8], [6u8; 16]);
    fs::write(&input_path, &encrypted).expect("write encrypted file");

    odrive_decrypt::decrypt(&input_path, "passphrase", &output_path).expect("decrypt file");

    let decrypted = fs::read(&output_path).expect("read decrypted");
    assert!(decrypted.is_empty());
}
