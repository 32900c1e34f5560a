use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commitment::{seal, verify};
use crate::config::{DEFAULT_TOKEN_IMAGE, DEFAULT_TOKEN_NAME};
use crate::error::KernelError;
use crate::intent::MintIntent;
use crate::reward::{reward_for, Tier};
use crate::sampler::SampleGenerator;
use crate::types::range::{SampleRange, SamplerConfig};

fn pinned_quality(q: i64) -> SampleGenerator {
    SampleGenerator::new(SamplerConfig {
        data_quality: SampleRange::new(q, q).unwrap(),
        ..SamplerConfig::default()
    })
}

#[test]
fn test_generate_hash_reward_excellent() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let record = pinned_quality(95).generate_at(&mut StdRng::seed_from_u64(11), now);
    let record = seal(record).unwrap();

    let hash = record.hash().unwrap().to_hex();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(verify(&record));

    let reward = reward_for(record.data_quality());
    assert_eq!(reward.quantity, 60);
    assert_eq!(reward.tier, Tier::Excellent);

    let intent = MintIntent::build(&record, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_IMAGE).unwrap();
    assert_eq!(intent.script_params[0], hash);
}

#[test]
fn test_generate_insufficient_short_circuits() {
    let record = seal(pinned_quality(45).generate(&mut StdRng::seed_from_u64(5))).unwrap();
    assert_eq!(reward_for(record.data_quality()).quantity, 0);

    let err = MintIntent::build(&record, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_IMAGE).unwrap_err();
    assert!(matches!(err, KernelError::InsufficientQuality { data_quality: 45, .. }));
}

#[test]
fn test_fresh_records_supersede() {
    let gen = SampleGenerator::default();
    let mut rng = StdRng::seed_from_u64(99);
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let first = seal(gen.generate_at(&mut rng, now)).unwrap();
    let second = seal(gen.generate_at(&mut rng, now)).unwrap();
    assert_ne!(first.hash(), second.hash());
}
