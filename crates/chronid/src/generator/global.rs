use std::sync::LazyLock;

use crate::{ObjectId, ObjectIdGenerator, Result, Ulid, UlidGenerator};

static ULID_GENERATOR: LazyLock<UlidGenerator> = LazyLock::new(UlidGenerator::new);
static OBJECT_ID_GENERATOR: LazyLock<ObjectIdGenerator> = LazyLock::new(ObjectIdGenerator::new);

/// Generates a random ULID from the process-wide generator.
///
/// # Errors
/// See [`UlidGenerator::generate_random`].
pub fn ulid() -> Result<Ulid> {
    ULID_GENERATOR.generate_random()
}

/// Generates the next monotonic ULID from the process-wide generator.
///
/// # Errors
/// See [`UlidGenerator::generate_monotonic`].
pub fn ulid_mono() -> Result<Ulid> {
    ULID_GENERATOR.generate_monotonic()
}

/// Generates a ULID with a cryptographically strong payload.
///
/// # Errors
/// See [`UlidGenerator::generate_crypto`].
pub fn ulid_crypto() -> Result<Ulid> {
    ULID_GENERATOR.generate_crypto()
}

/// Generates an ObjectId from the process-wide generator.
///
/// # Errors
/// See [`ObjectIdGenerator::generate`].
pub fn object_id() -> Result<ObjectId> {
    OBJECT_ID_GENERATOR.generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_wide_monotonic_sequence_increases() {
        let mut last = ulid_mono().unwrap();
        for _ in 0..100 {
            let next = ulid_mono().unwrap();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn helpers_produce_distinct_values() {
        assert_ne!(ulid().unwrap(), ulid().unwrap());
        assert_ne!(ulid_crypto().unwrap(), ulid_crypto().unwrap());
        assert_ne!(object_id().unwrap(), object_id().unwrap());
    }

    #[test]
    fn object_ids_carry_the_process_discriminator() {
        let id = object_id().unwrap();
        assert_eq!(id.machine_process(), crate::process_discriminator());
    }
}
