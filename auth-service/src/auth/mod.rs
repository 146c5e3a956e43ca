// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential handling for the auth service.
//!
//! ## Flow
//!
//! 1. `/api/register` hashes the password with bcrypt and stores the hash
//! 2. `/api/login` verifies the password against the stored hash and mints
//!    a signed token with a 24-hour expiry
//! 3. `/api/verify` validates the `Authorization: Bearer <token>` header
//!    and returns the decoded claims
//!
//! ## Security
//!
//! - Passwords are hashed with bcrypt (cost 10); the comparison is the
//!   library's constant-time check
//! - Tokens are HS256-signed with a deployment-configured secret, injected
//!   into [`TokenKeys`] at construction time
//! - Token verification failures are reported as a single undifferentiated
//!   error so callers cannot distinguish a bad signature from an expired
//!   token
//! - Login failures do not reveal whether the username exists

pub mod bearer;
pub mod error;
pub mod password;
pub mod token;

pub use bearer::bearer_token;
pub use error::AuthError;
pub use token::{Claims, TokenKeys};
