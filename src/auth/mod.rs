// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Identity authentication for the wellness tracker API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in with email + password
//! 2. Server verifies the credentials (Argon2id hash comparison) and issues
//!    a signed HS256 session token embedding the identity id and expiry
//! 3. Client sends `Authorization: Bearer <token>` on every request
//! 4. The [`Auth`] extractor verifies the token locally and attaches the
//!    resolved identity to the request
//!
//! ## Security
//!
//! - Secrets are stored only as salted Argon2id hashes
//! - Login failures use one message for unknown email and wrong password,
//!   and burn comparable hashing work in both paths
//! - Tokens are stateless; signature or expiry failure invalidates them
//!   unconditionally (no revocation list)
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use token::TokenCodec;
