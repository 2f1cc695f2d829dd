//! Keyword heuristic that flags probable transfers and card payments.

/// Returns true when a description looks like a transfer or payment and
/// should default to ignored.
///
/// This is a prefilter, not a guarantee: it only seeds the initial
/// `ignored` flag, and the user can toggle any transaction afterwards.
/// "payment" matches case-insensitively; "Web Authorized" and "Transfer"
/// match exactly as banks print them.
pub fn looks_like_transfer(description: &str) -> bool {
    description.to_lowercase().contains("payment")
        || description.contains("Web Authorized")
        || description.contains("Transfer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_matches_case_insensitively() {
        assert!(looks_like_transfer("Online Payment Thank You"));
        assert!(looks_like_transfer("online payment thank you"));
        assert!(looks_like_transfer("AUTOPAYMENT RECEIVED"));
    }

    #[test]
    fn transfer_and_web_authorized_match_case_sensitively() {
        assert!(looks_like_transfer("Transfer to Savings"));
        assert!(!looks_like_transfer("transfer to savings"));
        assert!(looks_like_transfer("Web Authorized Pmt VENDOR"));
        assert!(!looks_like_transfer("web authorized pmt VENDOR"));
    }

    #[test]
    fn ordinary_purchases_pass_through() {
        assert!(!looks_like_transfer("COFFEE SHOP"));
        assert!(!looks_like_transfer(""));
        assert!(!looks_like_transfer("GROCERY OUTLET #42"));
    }

    #[test]
    fn classification_is_deterministic() {
        let desc = "Online Payment Thank You";
        let first = looks_like_transfer(desc);
        for _ in 0..10 {
            assert_eq!(looks_like_transfer(desc), first);
        }
    }
}
