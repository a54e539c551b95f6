//! Public key encodings

pub mod spki;

pub use spki::{curve_name, decode_public_key, inspect, EdwardsCurve, KeyMetadata, PublicKeyDer};
