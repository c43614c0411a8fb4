//! Snappy block format compatibility tests
//!
//! These tests pin the exact bytes of encoded blocks and decode hand-built
//! blocks in the shape other Snappy implementations emit.

use snappy_block::{compress, decompress, decompressed_len};

/// Known input/output pairs for the encoder
const ENCODE_VECTORS: &[(&[u8], &str)] = &[
    (b"", "00"),
    (b"a", "010061"),
    (b"abc", "0308616263"),
    (b"abcdXYZWabcd", "0c1c6162636458595a570108"),
];

fn hex_bytes(text: &str) -> Vec<u8> {
    hex::decode(text).expect("valid hex fixture")
}

/// Test encoder output against the fixed vectors
#[test]
fn test_encode_vectors() -> Result<(), Box<dyn std::error::Error>> {
    for (input, expected) in ENCODE_VECTORS {
        let compressed = compress(input);
        assert_eq!(
            hex::encode(&compressed),
            *expected,
            "encoding mismatch for {:?}",
            String::from_utf8_lossy(input)
        );
        assert_eq!(decompress(&compressed)?, *input);
    }

    Ok(())
}

/// Test a one-byte run: literal followed by a 64 + 35 copy split at offset 1
#[test]
fn test_run_vector() -> Result<(), Box<dyn std::error::Error>> {
    let compressed = compress(&[b'a'; 100]);
    assert_eq!(hex::encode(&compressed), "640061fe01008a0100");
    assert_eq!(decompress(&compressed)?, vec![b'a'; 100]);
    Ok(())
}

/// Test the 60/61 byte literal boundary of the tag encoding
#[test]
fn test_literal_tag_boundary() -> Result<(), Box<dyn std::error::Error>> {
    let sixty: Vec<u8> = (0u8..60).collect();
    let compressed = compress(&sixty);
    assert_eq!(&compressed[..2], &[0x3C, 0xEC]);
    assert_eq!(&compressed[2..], &sixty[..]);

    let sixty_one: Vec<u8> = (0u8..61).collect();
    let compressed = compress(&sixty_one);
    assert_eq!(&compressed[..3], &[0x3D, 0xF0, 0x3C]);
    assert_eq!(&compressed[3..], &sixty_one[..]);

    Ok(())
}

/// Test copy element forms at the offset and length boundaries
#[test]
fn test_copy_tag_forms() -> Result<(), Box<dyn std::error::Error>> {
    let base: Vec<u8> = (100u8..164).collect();

    // (match length, trailing element bytes)
    let cases: &[(usize, &str)] = &[
        (4, "0140"),
        (11, "1d40"),
        (12, "2e4000"),
        (64, "fe4000"),
    ];

    for (len, tail) in cases {
        let mut data = base.clone();
        data.extend_from_slice(&base[..*len]);
        data.extend_from_slice(&[0x00, 0x01, 0x02]);

        let compressed = compress(&data);
        let tail_bytes = hex_bytes(tail);
        let copy_at = compressed.len() - 4 - tail_bytes.len();
        assert_eq!(
            &compressed[copy_at..copy_at + tail_bytes.len()],
            &tail_bytes[..],
            "copy encoding for length {len}"
        );
        assert_eq!(decompress(&compressed)?, data);
    }

    Ok(())
}

/// Test the 2047/2048 offset boundary between the copy forms
#[test]
fn test_copy_offset_boundary() -> Result<(), Box<dyn std::error::Error>> {
    for (distance, tail) in [(2047usize, "e1ff"), (2048, "0e0008")] {
        let mut data = b"WXYZ".to_vec();
        data.extend((0..distance - 4).map(|i| ((i * 7 + 3) % 251) as u8));
        data.extend_from_slice(b"WXYZ");

        let compressed = compress(&data);
        assert!(hex::encode(&compressed).ends_with(tail));
        assert_eq!(decompress(&compressed)?, data);
    }

    Ok(())
}

/// Test decoding blocks using every literal length field width
#[test]
fn test_decode_literal_field_widths() -> Result<(), Box<dyn std::error::Error>> {
    // 1, 2, 3 and 4 byte length fields all holding len - 1 = 4
    for (tag, field) in [
        ("f0", "04"),
        ("f4", "0400"),
        ("f8", "040000"),
        ("fc", "04000000"),
    ] {
        let block = hex_bytes(&format!("05{tag}{field}68656c6c6f"));
        assert_eq!(decompress(&block)?, b"hello");
    }

    Ok(())
}

/// Test decoding a block mixing both copy forms
#[test]
fn test_decode_mixed_copies() -> Result<(), Box<dyn std::error::Error>> {
    // "abcd", copy1(len 4, off 4), copy2(len 8, off 8), literal "!"
    let block = hex_bytes(concat!("11", "0c61626364", "0104", "1e0800", "0021"));
    assert_eq!(decompress(&block)?, b"abcdabcdabcdabcd!");
    assert_eq!(decompressed_len(&block)?, 17);
    Ok(())
}
