//! Address display helpers.

use alloy_primitives::Address;

/// Checksummed address shortened to `0x` plus four hex digits, an ellipsis
/// and the last four, e.g. `0x8ba1...BA72`.
pub fn truncate_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
