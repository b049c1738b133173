//! Identity unit tests.
