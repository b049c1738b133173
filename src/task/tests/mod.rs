//! Task workflow unit tests.

mod service_tests;
