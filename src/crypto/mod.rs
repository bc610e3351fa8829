//! oDrive 密码学原语模块。

pub mod kdf;
