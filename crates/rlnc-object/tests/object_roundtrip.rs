//! End-to-end object coding: partition, encode per block, decode from a
//! lossy symbol stream, reassemble, compare.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rlnc_core::{
    CodingConfig, DecoderFactory, EncoderFactory, RandomCoefficients,
};
use rlnc_field::{Binary, Binary8, Field};
use rlnc_object::{ObjectDecoder, ObjectEncoder};

fn object_bytes(len: usize, seed: u8) -> Vec<u8> {
    let mut rng = ChaCha20Rng::from_seed([seed; 32]);
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Encode an object block by block, deliver coded symbols with every third
/// one lost, decode, and reassemble.
fn roundtrip_with_loss<F: Field>(object_size: usize, config: &CodingConfig) {
    let object = object_bytes(object_size, 0x33);

    let mut encoder_factory = EncoderFactory::<F>::new(config.clone()).unwrap();
    let mut decoder_factory = DecoderFactory::<F>::new(config.clone()).unwrap();

    let mut object_encoder = ObjectEncoder::new(&mut encoder_factory, &object[..]).unwrap();
    let mut object_decoder =
        ObjectDecoder::new(&mut decoder_factory, object.len() as u32).unwrap();

    assert_eq!(object_encoder.encoders(), object_decoder.decoders());

    let mut coefficients =
        RandomCoefficients::<F, _>::new(ChaCha20Rng::from_seed([0x77; 32]));
    let mut reassembled = vec![0u8; object.len()];

    for block in 0..object_encoder.encoders() {
        let block_encoder = object_encoder.build(block).unwrap();
        let mut block_decoder = object_decoder.build(block).unwrap();

        let symbols = block_encoder.symbols();
        let mut delivered = 0u32;
        for attempt in 0..symbols * 4 + 32 {
            if block_decoder.is_complete() {
                break;
            }

            let mut vector = vec![0u8; block_encoder.vector_length()];
            coefficients.generate(symbols, &mut vector);
            let mut data = vec![0u8; block_encoder.symbol_size() as usize];
            block_encoder.encode(&mut data, &vector);

            // Every third symbol is lost in transit.
            if attempt % 3 == 2 {
                continue;
            }
            block_decoder.decode(&mut data, &mut vector);
            delivered += 1;
        }

        assert!(
            block_decoder.is_complete(),
            "block {block} incomplete after {delivered} delivered symbols"
        );
        object_decoder
            .copy_block(block, &block_decoder, &mut reassembled)
            .unwrap();
    }

    assert_eq!(reassembled, object);
}

#[test]
fn roundtrip_multi_block_object_binary() {
    let config = CodingConfig {
        max_symbols: 16,
        max_symbol_size: 256,
    };
    roundtrip_with_loss::<Binary>(10000, &config);
}

#[test]
fn roundtrip_multi_block_object_binary8() {
    let config = CodingConfig {
        max_symbols: 16,
        max_symbol_size: 256,
    };
    roundtrip_with_loss::<Binary8>(10000, &config);
}

#[test]
fn roundtrip_object_smaller_than_one_symbol() {
    let config = CodingConfig {
        max_symbols: 8,
        max_symbol_size: 64,
    };
    roundtrip_with_loss::<Binary8>(5, &config);
}

#[test]
fn roundtrip_object_with_padded_tail() {
    // 777 = 12 full symbols + 9 bytes into the 13th.
    let config = CodingConfig {
        max_symbols: 4,
        max_symbol_size: 64,
    };
    roundtrip_with_loss::<Binary>(777, &config);
}

/// Systematic delivery with a repair tail: source symbols first, losses
/// patched by coded symbols.
#[test]
fn roundtrip_systematic_with_coded_repair() {
    let object = object_bytes(4000, 0x11);
    let config = CodingConfig {
        max_symbols: 8,
        max_symbol_size: 128,
    };

    let mut encoder_factory = EncoderFactory::<Binary8>::new(config.clone()).unwrap();
    let mut decoder_factory = DecoderFactory::<Binary8>::new(config).unwrap();

    let mut object_encoder = ObjectEncoder::new(&mut encoder_factory, &object[..]).unwrap();
    let mut object_decoder =
        ObjectDecoder::new(&mut decoder_factory, object.len() as u32).unwrap();

    let mut coefficients =
        RandomCoefficients::<Binary8, _>::new(ChaCha20Rng::from_seed([0x99; 32]));
    let mut reassembled = vec![0u8; object.len()];

    for block in 0..object_encoder.encoders() {
        let block_encoder = object_encoder.build(block).unwrap();
        let mut block_decoder = object_decoder.build(block).unwrap();
        let symbols = block_encoder.symbols();

        // Systematic round with every second symbol lost.
        for index in (0..symbols).step_by(2) {
            let mut data = vec![0u8; block_encoder.symbol_size() as usize];
            block_encoder.encode_systematic(&mut data, index);
            block_decoder.decode_raw(&data, index);
        }
        assert!(!block_decoder.is_complete() || symbols == 1);

        // Coded repair symbols fill the gaps.
        for _ in 0..symbols * 4 + 16 {
            if block_decoder.is_complete() {
                break;
            }
            let mut vector = vec![0u8; block_encoder.vector_length()];
            coefficients.generate(symbols, &mut vector);
            let mut data = vec![0u8; block_encoder.symbol_size() as usize];
            block_encoder.encode(&mut data, &vector);
            block_decoder.decode(&mut data, &mut vector);
        }

        assert!(block_decoder.is_complete());
        object_decoder
            .copy_block(block, &block_decoder, &mut reassembled)
            .unwrap();
    }

    assert_eq!(reassembled, object);
}
