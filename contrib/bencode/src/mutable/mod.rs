pub mod bencode_mut;
pub mod encode;
