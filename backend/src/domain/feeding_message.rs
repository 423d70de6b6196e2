//! Text stored alongside a new feeding event.

use rand::Rng;
use rand::seq::SliceRandom;

/// Punctuation appended to every generated message.
pub const PUNCTUATION: [char; 2] = ['!', '.'];

/// What follows the feeder's name.
const TEMPLATES: [&str; 3] = ["fed that fat boy", "fed chungus", "has fed chonk"];

/// Generate a feeding message for `name` using the thread-local RNG.
///
/// # Examples
/// ```
/// use chatte_backend::domain::feeding_message::{generate, PUNCTUATION};
///
/// let message = generate("Ada");
/// assert!(message.starts_with("Ada "));
/// assert!(message.ends_with(PUNCTUATION));
/// ```
pub fn generate(name: &str) -> String {
    generate_with(&mut rand::thread_rng(), name)
}

/// Generate a feeding message drawing randomness from `rng`.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, name: &str) -> String {
    // Both arrays are non-empty constants, so `choose` always yields a value.
    let action = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
    let punctuation = PUNCTUATION.choose(rng).copied().unwrap_or(PUNCTUATION[0]);
    format!("{name} {action}{punctuation}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case("Ada")]
    #[case("Grace Hopper")]
    #[case("o'brien %_")]
    fn contains_name_and_ends_with_single_punctuation(#[case] name: &str) {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let message = generate_with(&mut rng, name);
            assert!(message.contains(name), "{message} should contain {name}");
            let mut tail = message.chars().rev();
            let last = tail.next().expect("non-empty message");
            assert!(PUNCTUATION.contains(&last));
            let before_last = tail.next().expect("template precedes punctuation");
            assert!(!PUNCTUATION.contains(&before_last));
        }
    }

    #[test]
    fn eventually_uses_every_template_and_mark() {
        let mut rng = SmallRng::seed_from_u64(42);
        let seen: HashSet<String> = (0..500).map(|_| generate_with(&mut rng, "Ada")).collect();
        assert_eq!(seen.len(), TEMPLATES.len() * PUNCTUATION.len());
    }

    #[test]
    fn thread_rng_variant_uses_known_templates() {
        let message = generate("Ada");
        let body = message
            .strip_suffix(PUNCTUATION)
            .expect("message ends with punctuation");
        assert!(
            ["Ada fed that fat boy", "Ada fed chungus", "Ada has fed chonk"].contains(&body),
            "unexpected message body: {body}"
        );
    }
}
