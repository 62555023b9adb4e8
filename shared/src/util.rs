/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an externally visible order transaction reference.
///
/// Format: `ORDER-XXXXX-XXXXX` (uppercase alphanumeric). The reference is what
/// the payment gateway echoes back in webhook notifications, so it must be
/// unique across the system; the `orders.transaction_id` UNIQUE constraint is
/// the final arbiter, this just makes collisions astronomically unlikely.
pub fn transaction_ref() -> String {
    format!("ORDER-{}-{}", random_block(5), random_block(5))
}

fn random_block(len: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_ref_format() {
        let r = transaction_ref();
        let parts: Vec<&str> = r.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORDER");
        assert_eq!(parts[1].len(), 5);
        assert_eq!(parts[2].len(), 5);
        assert!(r.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_transaction_refs_differ() {
        let a = transaction_ref();
        let b = transaction_ref();
        assert_ne!(a, b);
    }
}
