//! Registry dispatch and failure translation
//!
//! Unknown operations, malformed artifacts, and cipher failures must
//! all surface as structured failures with the right kind code.

use secenc_engine::{EngineConfig, ErrorKind, OperationRegistry};
use secenc_engine::crypto::MemoryKeyStore;

fn registry() -> OperationRegistry {
    OperationRegistry::with_provider(EngineConfig::default(), Box::new(MemoryKeyStore::new()))
}

#[test]
fn unknown_pairs_fail_with_unsupported_operation() {
    let registry = registry();
    for (direction, algorithm) in [
        ("encode", "rot13"),
        ("decode", "zstd"),
        ("transcode", "hex"),
        ("", ""),
        ("ENCODE", "hex"), // names are case-sensitive
    ] {
        let err = registry.dispatch(direction, algorithm, "x").unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::UnsupportedOperation,
            "({direction}, {algorithm})"
        );
    }
}

#[test]
fn known_pairs_resolve() {
    let registry = registry();
    for algorithm in [
        "base64", "hex", "utf8", "latin1", "ascii", "url-escape", "lz77", "lzw", "huffman",
        "aes-gcm", "rsa-oaep",
    ] {
        for direction in ["encode", "decode"] {
            assert!(registry.resolve(direction, algorithm).is_ok());
        }
    }
}

#[test]
fn malformed_plain_artifacts_are_decoding_errors() {
    let registry = registry();
    for (algorithm, artifact) in [
        ("hex", "abc"),         // odd length
        ("hex", "zz"),          // bad digit
        ("base64", "!!!"),      // bad alphabet
        ("ascii", "104 junk"),  // non-numeric token
        ("url-escape", "%ff"),  // escapes to invalid UTF-8
    ] {
        let err = registry.dispatch("decode", algorithm, artifact).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding, "{algorithm} {artifact:?}");
    }
}

#[test]
fn corrupted_compressed_artifacts_are_format_errors() {
    let registry = registry();
    for algorithm in ["lz77", "lzw", "huffman"] {
        let err = registry
            .dispatch("decode", algorithm, "definitely*not*an*artifact")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CompressedFormat, "{algorithm}");
    }
}

#[test]
fn truncated_compressed_artifacts_are_format_errors() {
    let registry = registry();
    for algorithm in ["lzw", "huffman"] {
        let artifact = registry
            .dispatch("encode", algorithm, "some compressible text text text")
            .unwrap();
        // Drop the tail of the artifact but keep it valid base64.
        let truncated: String = artifact.chars().take(4).collect();
        let result = registry.dispatch("decode", algorithm, &truncated);
        assert!(result.is_err(), "{algorithm} accepted a truncated artifact");
    }
}

#[test]
fn failures_carry_kind_and_message() {
    let registry = registry();
    let err = registry.dispatch("decode", "hex", "abc").unwrap_err();
    let failure = err.to_failure();
    assert_eq!(failure.kind, "DECODING_ERROR");
    assert!(!failure.message.is_empty());

    let json = serde_json::to_value(&failure).unwrap();
    assert!(json["message"].as_str().unwrap().contains("hex"));
}

#[test]
fn latin1_rejects_unrepresentable_input_on_encode() {
    let err = registry().dispatch("encode", "latin1", "日本語").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decoding);
}
