//! ENS registry and resolver wire helpers
//!
//! Calldata for the registry and resolver views is built by hand (selector
//! plus ABI-padded arguments) and return data is decoded by hand, so no ABI
//! machinery is needed for this fixed set of methods.

use alloy::primitives::{keccak256, Address, B256};

/// Mainnet ENS registry
pub const ENS_REGISTRY: Address = Address::new([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x2E, 0x07, 0x4e, 0xC6, 0x9A, 0x0d, 0xBF, 0xc9, 0x09,
    0x69, 0x06, 0xd6, 0xd5, 0xF7,
]);

// Function selectors for the registry and the public resolver views
const SEL_RESOLVER: [u8; 4] = [0x01, 0x78, 0xb8, 0xbf]; // resolver(bytes32)
const SEL_ADDR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde]; // addr(bytes32)
const SEL_ADDR_COIN: [u8; 4] = [0xf1, 0xcb, 0x7e, 0x06]; // addr(bytes32,uint256)
const SEL_NAME: [u8; 4] = [0x69, 0x1f, 0x34, 0x31]; // name(bytes32)
const SEL_TEXT: [u8; 4] = [0x59, 0xd1, 0xd4, 0x3c]; // text(bytes32,string)
const SEL_CONTENTHASH: [u8; 4] = [0xbc, 0x1c, 0x58, 0xd1]; // contenthash(bytes32)

/// Compute the hierarchical ENS namehash of a dot-separated name.
///
/// Labels are hashed right to left over the accumulated node. Input is
/// lowercased first; full UTS-46 normalization is left to the caller's
/// input discipline.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return node;
    }
    for label in name.split('.').rev() {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Node for the reverse record of an address: `<hex-address>.addr.reverse`
pub fn reverse_node(address: Address) -> B256 {
    namehash(&format!("{}.addr.reverse", hex::encode(address.as_slice())))
}

pub fn encode_resolver(node: B256) -> Vec<u8> {
    encode_node_call(SEL_RESOLVER, node)
}

pub fn encode_addr(node: B256) -> Vec<u8> {
    encode_node_call(SEL_ADDR, node)
}

pub fn encode_addr_coin(node: B256, coin_type: u64) -> Vec<u8> {
    let mut data = encode_node_call(SEL_ADDR_COIN, node);
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&coin_type.to_be_bytes());
    data.extend_from_slice(&word);
    data
}

pub fn encode_name(node: B256) -> Vec<u8> {
    encode_node_call(SEL_NAME, node)
}

pub fn encode_contenthash(node: B256) -> Vec<u8> {
    encode_node_call(SEL_CONTENTHASH, node)
}

/// text(bytes32,string) carries one dynamic argument: head word for the
/// node, offset word, then length-prefixed key bytes padded to 32.
pub fn encode_text(node: B256, key: &str) -> Vec<u8> {
    let mut data = encode_node_call(SEL_TEXT, node);

    let mut offset = [0u8; 32];
    offset[31] = 0x40;
    data.extend_from_slice(&offset);

    let key_bytes = key.as_bytes();
    let mut len = [0u8; 32];
    len[24..].copy_from_slice(&(key_bytes.len() as u64).to_be_bytes());
    data.extend_from_slice(&len);

    data.extend_from_slice(key_bytes);
    let padding = (32 - key_bytes.len() % 32) % 32;
    data.extend_from_slice(&vec![0u8; padding]);
    data
}

fn encode_node_call(selector: [u8; 4], node: B256) -> Vec<u8> {
    let mut data = selector.to_vec();
    data.extend_from_slice(node.as_slice());
    data
}

/// Decode a single 32-byte word holding an address. The zero address means
/// "no record" and decodes to None.
pub fn decode_address(data: &[u8]) -> Option<Address> {
    if data.len() < 32 {
        return None;
    }
    let address = Address::from_slice(&data[12..32]);
    if address == Address::ZERO {
        None
    } else {
        Some(address)
    }
}

/// Decode a dynamic `bytes` return value. Empty bytes decode to None.
pub fn decode_bytes(data: &[u8]) -> Option<Vec<u8>> {
    if data.len() < 64 {
        return None;
    }
    let offset = be_word_as_usize(&data[..32])?;
    let len = be_word_as_usize(data.get(offset..offset + 32)?)?;
    if len == 0 {
        return None;
    }
    let start = offset + 32;
    data.get(start..start + len).map(|slice| slice.to_vec())
}

/// Decode a dynamic `string` return value. Empty or non-UTF-8 strings
/// decode to None.
pub fn decode_string(data: &[u8]) -> Option<String> {
    let bytes = decode_bytes(data)?;
    String::from_utf8(bytes).ok().filter(|s| !s.is_empty())
}

fn be_word_as_usize(word: &[u8]) -> Option<usize> {
    if word.len() != 32 || word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(buf) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namehash_known_vectors() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            format!("{:?}", namehash("eth")),
            "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
        assert_eq!(
            format!("{:?}", namehash("foo.eth")),
            "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
        );
        // Case-insensitive
        assert_eq!(namehash("Foo.ETH"), namehash("foo.eth"));
    }

    #[test]
    fn test_encode_text_layout() {
        let node = namehash("foo.eth");
        let data = encode_text(node, "avatar");
        assert_eq!(&data[..4], &[0x59, 0xd1, 0xd4, 0x3c]);
        assert_eq!(&data[4..36], node.as_slice());
        // offset word points past the two head words
        assert_eq!(data[67], 0x40);
        // length word
        assert_eq!(data[99], 6);
        assert_eq!(&data[100..106], b"avatar");
        assert_eq!(data.len(), 4 + 32 * 4);
    }

    #[test]
    fn test_decode_round_trips() {
        // address word
        let mut word = vec![0u8; 32];
        word[12..].copy_from_slice(&[0x11u8; 20]);
        assert_eq!(decode_address(&word), Some(Address::new([0x11; 20])));
        assert_eq!(decode_address(&[0u8; 32]), None);

        // dynamic string "hello"
        let mut data = vec![0u8; 64];
        data[31] = 0x20;
        data[63] = 5;
        data.extend_from_slice(b"hello");
        data.extend_from_slice(&[0u8; 27]);
        assert_eq!(decode_string(&data), Some("hello".to_string()));

        // empty bytes
        let mut empty = vec![0u8; 64];
        empty[31] = 0x20;
        assert_eq!(decode_bytes(&empty), None);
    }
}
