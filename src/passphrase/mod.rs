//! Word-list passphrases.

mod generator;
mod wordlist;

pub use generator::{generate, Passphrase, PassphraseError, PassphrasePolicy, MAX_WORDS};
pub use wordlist::WORDS;
