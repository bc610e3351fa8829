//! oDrive 磁盘格式模块。
//!
//! Header 布局与密文流解密分别见子模块。

pub mod header;
pub mod stream;
