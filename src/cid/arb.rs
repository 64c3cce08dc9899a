use quickcheck::{
  Arbitrary,
  Gen,
};
use rand::{
  distributions::WeightedIndex,
  prelude::Distribution,
  Rng,
};
use sha2::{
  Digest,
  Sha256,
};

use super::{
  Cid,
  Version,
};
use crate::multihash::{
  Multihash,
  SHA2_256,
};

impl Arbitrary for Version {
  fn arbitrary(g: &mut Gen) -> Self {
    if u8::arbitrary(g) % 10 < 7 { Version::V1 } else { Version::V0 }
  }
}

/// Codec codes skewed towards short varints.
fn arbitrary_codec() -> u64 {
  let weights = [128, 32, 4, 4, 2, 2, 1, 1];
  let mut rng = rand::thread_rng();
  let dist = WeightedIndex::new(weights.iter()).unwrap();
  match dist.sample(&mut rng) {
    0 => rng.gen_range(0..1u64 << 7),
    1 => rng.gen_range(1u64 << 7..1 << 14),
    2 => rng.gen_range(1u64 << 14..1 << 21),
    3 => rng.gen_range(1u64 << 21..1 << 28),
    4 => rng.gen_range(1u64 << 28..1 << 35),
    5 => rng.gen_range(1u64 << 35..1 << 42),
    6 => rng.gen_range(1u64 << 42..1 << 49),
    _ => rng.gen_range(1u64 << 49..u64::MAX),
  }
}

impl Arbitrary for Cid {
  fn arbitrary(g: &mut Gen) -> Self {
    match Version::arbitrary(g) {
      Version::V0 => {
        let data: Vec<u8> = Arbitrary::arbitrary(g);
        let multihash = Multihash::create(SHA2_256, &Sha256::digest(&data));
        Cid::new_v0(multihash).unwrap()
      }
      Version::V1 => Cid::new_v1(arbitrary_codec(), Multihash::arbitrary(g)),
    }
  }
}
