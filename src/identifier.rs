//! 标识符生成模块
//!
//! # 设计思路
//!
//! 每次操作都会为产物（图片、映射文件、碎片目录）分配一个不透明标识，
//! 它只用于命名，不携带语义，也不要求密码学不可预测。
//!
//! 核心流程只依赖 `IdGenerator` 能力，测试中可注入固定标识。

/// 产物标识生成能力。
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// 默认实现：128 位随机数的 32 位小写十六进制表示。
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> String {
        format!("{:032x}", rand::random::<u128>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_id_is_32_hex_chars() {
        let id = RandomIdGenerator.generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn random_ids_differ() {
        let generator = RandomIdGenerator;
        assert_ne!(generator.generate_id(), generator.generate_id());
    }
}
