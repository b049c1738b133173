//! Project and membership unit tests.
