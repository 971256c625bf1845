//! Trait and helpers of the ERC-165 standard, as defined in the [ERC].
//!
//! [ERC]: https://eips.ethereum.org/EIPS/eip-165

use alloy_primitives::aliases::B32;

/// Interface of the ERC-165 standard, as defined in the [ERC].
///
/// Implementers can declare support of contract interfaces, which others can
/// query.
///
/// [ERC]: https://eips.ethereum.org/EIPS/eip-165
pub trait IErc165 {
    /// Returns true if this contract implements the interface defined by
    /// `interface_id`. See the corresponding [ERC] to learn more about how
    /// these ids are created.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `interface_id` - The interface identifier, as specified in the [ERC].
    ///
    /// [ERC]: https://eips.ethereum.org/EIPS/eip-165#how-interfaces-are-identified
    fn supports_interface(&self, interface_id: B32) -> bool;
}

/// Interface id of [`IErc165`] itself: the selector of
/// `supportsInterface(bytes4)`.
pub const INTERFACE_ID: B32 = B32::new([0x01, 0xff, 0xc9, 0xa7]);

/// Computes an interface id as the XOR of all its function `selectors`.
#[must_use]
pub const fn interface_id(selectors: &[[u8; 4]]) -> B32 {
    let mut id = [0u8; 4];
    let mut i = 0;
    while i < selectors.len() {
        let selector = selectors[i];
        id[0] ^= selector[0];
        id[1] ^= selector[1];
        id[2] ^= selector[2];
        id[3] ^= selector[3];
        i += 1;
    }
    B32::new(id)
}
