//! Session manager integration tests
//!
//! Exercised over mock transports; the stdio factory is only touched where a
//! test genuinely wants command resolution to fail.

mod lifecycle;
mod router;
