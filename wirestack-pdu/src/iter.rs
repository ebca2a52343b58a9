//! Non-owning traversal over a layer chain
//!
//! The ownership links of a chain only point inward, so a backward step
//! cannot follow them. [`PduIter`] instead caches each node it leaves on a
//! traversal stack: O(1) per step either direction, O(depth) memory, valid
//! for any forward/backward interleaving within a single traversal.

use crate::pdu::{Pdu, PduType};

/// Bidirectional cursor over a layer chain.
///
/// The end position is one past the terminal layer and must not be
/// dereferenced. Stepping backward from the chain's first layer is a
/// programming error and panics.
#[derive(Debug, Default)]
pub struct PduIter<'a> {
    visited: Vec<&'a dyn Pdu>,
    current: Option<&'a dyn Pdu>,
}

impl<'a> PduIter<'a> {
    /// Create an iterator positioned at the chain's root. O(1).
    pub fn new(root: &'a dyn Pdu) -> Self {
        Self {
            visited: Vec::new(),
            current: Some(root),
        }
    }

    /// The canonical one-past-terminal sentinel
    pub fn end() -> Self {
        Self::default()
    }

    /// Whether this iterator is at the end sentinel
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// The layer at the current position.
    ///
    /// # Panics
    /// Panics at the end sentinel.
    pub fn get(&self) -> &'a dyn Pdu {
        self.current.expect("dereferenced end of chain")
    }

    /// Step inward to the next layer.
    ///
    /// # Panics
    /// Panics if already at the end sentinel.
    pub fn advance(&mut self) {
        let current = self.current.expect("advanced past end of chain");
        self.visited.push(current);
        self.current = current.inner_pdu();
    }

    /// Step outward to the previous layer.
    ///
    /// # Panics
    /// Panics at the first layer of the traversal.
    pub fn retreat(&mut self) {
        self.current = Some(self.visited.pop().expect("retreated past start of chain"));
    }
}

impl PartialEq for PduIter<'_> {
    /// Two iterators over the same chain are equal when they sit on the
    /// same node; all end sentinels are equal.
    fn eq(&self, other: &Self) -> bool {
        node_addr(self.current) == node_addr(other.current)
    }
}

impl Eq for PduIter<'_> {}

fn node_addr(node: Option<&dyn Pdu>) -> Option<*const u8> {
    node.map(|pdu| pdu as *const dyn Pdu as *const u8)
}

impl<'a> Iterator for PduIter<'a> {
    type Item = &'a dyn Pdu;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.advance();
        Some(current)
    }
}

/// Iterate the chain rooted at `root`, outermost layer first
pub fn iterate_pdus(root: &dyn Pdu) -> PduIter<'_> {
    PduIter::new(root)
}

/// Find the first layer of the given type in the chain rooted at `root`
pub fn find_pdu(root: &dyn Pdu, pdu_type: PduType) -> Option<&dyn Pdu> {
    iterate_pdus(root).find(|pdu| pdu.pdu_type() == pdu_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethernet::EthernetII;
    use crate::raw::RawPdu;
    use crate::vxlan::Vxlan;

    fn three_layer_chain() -> Vxlan {
        let mut ethernet = EthernetII::new();
        ethernet.set_inner_pdu(Some(Box::new(RawPdu::new(vec![0xAB; 8]))));
        let mut vxlan = Vxlan::new(100);
        vxlan.set_inner_pdu(Some(Box::new(ethernet)));
        vxlan
    }

    #[test]
    fn test_forward_traversal_order() {
        let chain = three_layer_chain();
        let types: Vec<PduType> = iterate_pdus(&chain).map(|pdu| pdu.pdu_type()).collect();
        assert_eq!(
            types,
            vec![PduType::Vxlan, PduType::EthernetII, PduType::Raw]
        );
    }

    #[test]
    fn test_count() {
        let chain = three_layer_chain();
        assert_eq!(iterate_pdus(&chain).count(), 3);
    }

    #[test]
    fn test_advance_twice_retreat_once() {
        let chain = three_layer_chain();
        let mut iter = iterate_pdus(&chain);
        iter.advance();
        iter.advance();
        iter.retreat();
        assert_eq!(iter.get().pdu_type(), PduType::EthernetII);
    }

    #[test]
    fn test_retreat_to_start_equals_fresh_iterator() {
        let chain = three_layer_chain();
        let mut iter = iterate_pdus(&chain);
        iter.advance();
        iter.retreat();
        assert_eq!(iter, iterate_pdus(&chain));
    }

    #[test]
    fn test_end_sentinels_equal() {
        let chain = three_layer_chain();
        let mut iter = iterate_pdus(&chain);
        iter.advance();
        iter.advance();
        iter.advance();
        assert!(iter.at_end());
        assert_eq!(iter, PduIter::end());
        assert_ne!(iterate_pdus(&chain), PduIter::end());
    }

    #[test]
    #[should_panic(expected = "retreated past start")]
    fn test_retreat_at_start_panics() {
        let chain = three_layer_chain();
        let mut iter = iterate_pdus(&chain);
        iter.retreat();
    }

    #[test]
    #[should_panic(expected = "dereferenced end")]
    fn test_deref_end_panics() {
        PduIter::end().get();
    }

    #[test]
    fn test_find_pdu() {
        let chain = three_layer_chain();
        assert!(find_pdu(&chain, PduType::Raw).is_some());
        assert!(find_pdu(&chain, PduType::Sll).is_none());
    }
}
