use std::sync::atomic::{AtomicU64, Ordering};

///
/// GENERATOR keeps process-wide state so generated keys stay unique for
/// the lifetime of the process. Generated keys are opaque handles used
/// only for later removal; uniqueness is the whole contract, so they
/// come from a monotonic counter rather than a random source.
///

static GENERATOR: Generator = Generator::new();

/// Generate a fresh registry key.
pub(crate) fn generate() -> String {
    GENERATOR.next_key()
}

///
/// Generator
///

struct Generator {
    next: AtomicU64,
}

impl Generator {
    const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    fn next_key(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);

        format!("_{n:016x}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_unique() {
        let a = generate();
        let b = generate();
        let c = generate();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }
}
