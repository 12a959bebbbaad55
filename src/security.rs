//! Security Module
//!
//! 入力処理時の制限値を定義するモジュール。
//! ワークブックは全体をメモリに展開するため、入力サイズに上限を設けます。

/// セキュリティ設定
///
/// 入力読み込み時の制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 2 * 1024 * 1024 * 1024);
    }
}
