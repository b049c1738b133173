//! Application services for identity management.

mod accounts;

pub use accounts::{
    AccountService, AccountServiceError, AccountServiceResult, RegisterUserRequest,
};
