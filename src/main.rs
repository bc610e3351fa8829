//! odrive-decrypt 命令行入口
//!
//! 提供最小可用的 CLI：
//!
//! 用法：
//!   odrive-decrypt <input> <output> [passphrase]
//!
//! 设计原则：
//! - 不依赖 clap / structopt
//! - 参数解析保持"一眼能懂"
//! - 口令缺省时用 rpassword 交互式读取，避免留在 shell 历史里
//! - 所有实际逻辑都委托给库入口

mod crypto;
mod decrypt;
mod error;
mod format;
mod verify;

use std::path::Path;
use std::process::exit;
use std::{env, io};

fn print_usage() {
    eprintln!("Usage:\n  odrive-decrypt <input> <output> [passphrase]");
}

fn read_passphrase() -> io::Result<String> {
    rpassword::prompt_password("Passphrase: ")
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 3 && args.len() != 4 {
        print_usage();
        exit(1);
    }

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    let passphrase = match args.get(3) {
        Some(p) => p.clone(),
        None => match read_passphrase() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        },
    };

    if let Err(e) = decrypt::decrypt_file(input, &passphrase, output) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
