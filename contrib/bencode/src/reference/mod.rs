pub mod bencode_ref;
pub mod decode;
pub mod decode_opt;
