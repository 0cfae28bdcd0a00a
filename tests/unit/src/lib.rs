//! Behavioural tests for the seedlock crates live in `tests/`.
