use swarm_canary_contrib_bencode::{ben_bytes, ben_int, ben_list, ben_map, decode, encode, BencodeMut, BencodeParseError};

#[test]
fn positive_ben_map_macro() {
    let result = (ben_map! {
        "key" => ben_bytes!("value")
    })
    .encode();

    assert_eq!("d3:key5:valuee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_ben_list_macro() {
    let result = (ben_list!(ben_int!(5))).encode();

    assert_eq!("li5ee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_ben_map_macro_sorts_keys_regardless_of_insertion_order() {
    let first = ben_map! {
        "pieces" => ben_bytes!(vec![0u8; 20]),
        "name" => ben_bytes!("a.txt"),
        "length" => ben_int!(1)
    };
    let second = ben_map! {
        "length" => ben_int!(1),
        "pieces" => ben_bytes!(vec![0u8; 20]),
        "name" => ben_bytes!("a.txt")
    };

    assert_eq!(encode(&first), encode(&second));
}

#[test]
fn positive_decode_reports_the_number_of_bytes_consumed() {
    let (value, consumed) = decode(b"i42etrailing").unwrap();

    assert_eq!(value.int(), Some(42));
    assert_eq!(consumed, 4);
}

#[test]
fn positive_round_trip_of_every_value_kind() {
    let values = vec![
        ben_int!(0),
        ben_int!(-17),
        ben_int!(i64::MAX),
        ben_int!(i64::MIN),
        ben_bytes!(""),
        ben_bytes!(vec![0u8, 1, 2, 255, b'e', b':']),
        ben_list!(),
        ben_list!(ben_int!(1), ben_bytes!("two"), ben_list!(ben_int!(3))),
        ben_map! {},
        ben_map! {
            "" => ben_bytes!("empty key"),
            "info" => ben_map! {
                "length" => ben_int!(1),
                "peers" => ben_list!(ben_bytes!(vec![127u8, 0, 0, 1, 0x1a, 0xe1]))
            }
        },
    ];

    for value in values {
        let bytes = encode(&value);
        let (decoded, consumed) = decode(&bytes).unwrap();

        assert_eq!(consumed, bytes.len());
        assert_eq!(BencodeMut::from(&decoded), value);
    }
}

#[test]
fn negative_decode_of_malformed_inputs() {
    assert!(matches!(decode(b""), Err(BencodeParseError::BytesEmpty { .. })));
    assert!(matches!(decode(b"i-0e"), Err(BencodeParseError::InvalidIntNegativeZero { .. })));
    assert!(matches!(decode(b"i007e"), Err(BencodeParseError::InvalidIntZeroPadding { .. })));
    assert!(matches!(decode(b"i+5e"), Err(BencodeParseError::InvalidIntParseError { .. })));
    assert!(matches!(decode(b"i+0e"), Err(BencodeParseError::InvalidIntParseError { .. })));
    assert!(matches!(decode(b"4:abc"), Err(BencodeParseError::InvalidLengthOverflow { .. })));
    assert!(matches!(decode(b"d3:key"), Err(BencodeParseError::BytesEmpty { .. })));
    assert!(matches!(decode(b"x"), Err(BencodeParseError::InvalidByte { .. })));
}
